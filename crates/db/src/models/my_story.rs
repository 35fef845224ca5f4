//! MyStory model and request DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taleweave_core::types::{DbId, Timestamp};
use validator::Validate;

/// Maximum length of a MyStory display name.
pub const MAX_STORY_NAME_LENGTH: u64 = 100;

/// A row from the `my_stories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MyStory {
    pub id: DbId,
    pub user_id: DbId,
    pub story_id: DbId,
    pub story_name: String,
    pub finished: bool,
    pub is_default: bool,
    /// Head of the chosen substory chain; `None` until finalized.
    pub first_substory_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MyStory {
    pub fn is_finalized(&self) -> bool {
        self.first_substory_id.is_some()
    }
}

/// Body of `POST /mystories`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMyStory {
    #[validate(range(min = 1))]
    pub story_id: DbId,
    #[validate(length(min = 1, max = MAX_STORY_NAME_LENGTH))]
    pub story_name: String,
}

/// Body of `POST /mystories/{id}` (final submission).
///
/// `substory_list` stays optional here so that an absent list is reported as
/// a validation failure rather than a deserialization one. The finished flag
/// may arrive as `job` or `finished`; `job` wins when both are sent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FinalizeMyStory {
    pub substory_list: Option<Vec<DbId>>,
    #[serde(default)]
    pub job: Option<bool>,
    #[serde(default)]
    pub finished: Option<bool>,
    #[serde(default)]
    pub is_default: bool,
}

impl FinalizeMyStory {
    pub fn is_finished(&self) -> bool {
        self.job.or(self.finished).unwrap_or(false)
    }
}
