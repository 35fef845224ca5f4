//! Per-user image directory layout and the conversion-to-mystory copy.
//!
//! ```text
//! <media_root>/images/user/<user_id>/conversion/            staging area
//! <media_root>/images/user/<user_id>/mystory/<mystory_id>/  permanent area
//! ```
//!
//! The copy refuses to merge into an existing destination and fails when the
//! staging area is missing.

use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::types::DbId;

/// Name of the per-user staging directory.
pub const CONVERSION_DIR: &str = "conversion";

/// Name of the per-user directory holding one subdirectory per MyStory.
pub const MYSTORY_DIR: &str = "mystory";

/// Resolves image directories beneath a media root.
#[derive(Debug, Clone)]
pub struct ImageLayout {
    media_root: PathBuf,
}

impl ImageLayout {
    pub fn new(media_root: impl Into<PathBuf>) -> Self {
        Self {
            media_root: media_root.into(),
        }
    }

    pub fn media_root(&self) -> &Path {
        &self.media_root
    }

    /// `<media_root>/images/user/<user_id>`
    pub fn user_dir(&self, user_id: DbId) -> PathBuf {
        self.media_root
            .join("images")
            .join("user")
            .join(user_id.to_string())
    }

    pub fn conversion_dir(&self, user_id: DbId) -> PathBuf {
        self.user_dir(user_id).join(CONVERSION_DIR)
    }

    pub fn my_story_dir(&self, user_id: DbId, my_story_id: DbId) -> PathBuf {
        self.user_dir(user_id)
            .join(MYSTORY_DIR)
            .join(my_story_id.to_string())
    }
}

/// Copy the user's staging directory into the permanent MyStory directory.
///
/// Returns the destination path and the number of files copied. On a copy
/// failure the partially written destination is removed before returning.
pub async fn promote_conversion_dir(
    layout: &ImageLayout,
    user_id: DbId,
    my_story_id: DbId,
) -> Result<(PathBuf, u64), CoreError> {
    let src = layout.conversion_dir(user_id);
    let dst = layout.my_story_dir(user_id, my_story_id);

    if !tokio::fs::try_exists(&src).await.unwrap_or(false) {
        return Err(CoreError::Validation(format!(
            "No staged images for user {user_id}"
        )));
    }
    if tokio::fs::try_exists(&dst).await.unwrap_or(true) {
        return Err(CoreError::Conflict(format!(
            "Image directory for MyStory {my_story_id} already exists"
        )));
    }
    if let Some(parent) = dst.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to create {}: {e}", parent.display())))?;
    }

    match copy_dir_all(&src, &dst).await {
        Ok(count) => {
            tracing::debug!(user_id, my_story_id, files = count, dst = %dst.display(), "Copied staged images");
            Ok((dst, count))
        }
        // Lost a race for the destination; it is not ours to remove.
        Err(e @ CoreError::Conflict(_)) => Err(e),
        Err(e) => {
            remove_dir_quietly(&dst).await;
            Err(e)
        }
    }
}

/// Recursively copy `src` into a new directory `dst`, returning the file count.
///
/// Fails with [`CoreError::Conflict`] if `dst` already exists.
pub async fn copy_dir_all(src: &Path, dst: &Path) -> Result<u64, CoreError> {
    tokio::fs::create_dir(dst).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::AlreadyExists => {
            CoreError::Conflict(format!("{} already exists", dst.display()))
        }
        _ => CoreError::Internal(format!("Failed to create {}: {e}", dst.display())),
    })?;

    let mut count = 0;
    copy_recursive(src, dst, &mut count).await?;
    Ok(count)
}

async fn copy_recursive(src: &Path, dst: &Path, count: &mut u64) -> Result<(), CoreError> {
    let mut entries = tokio::fs::read_dir(src)
        .await
        .map_err(|e| CoreError::Internal(format!("Failed to read {}: {e}", src.display())))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| CoreError::Internal(format!("Failed to read entry: {e}")))?
    {
        let from = entry.path();
        let to = dst.join(entry.file_name());
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| CoreError::Internal(e.to_string()))?;

        if file_type.is_dir() {
            tokio::fs::create_dir(&to)
                .await
                .map_err(|e| CoreError::Internal(format!("Failed to create {}: {e}", to.display())))?;
            Box::pin(copy_recursive(&from, &to, count)).await?;
        } else {
            tokio::fs::copy(&from, &to)
                .await
                .map_err(|e| CoreError::Internal(format!("Failed to copy {}: {e}", from.display())))?;
            *count += 1;
        }
    }
    Ok(())
}

/// Remove a directory tree, logging instead of failing.
pub async fn remove_dir_quietly(path: &Path) {
    if let Err(e) = tokio::fs::remove_dir_all(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove directory");
        }
    }
}
