//! Domain error type shared by the database and API layers.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The request collides with existing state (an already-finalized
    /// MyStory, an occupied image directory).
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The record exists but belongs to another user.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound { entity, id }
    }
}

/// Reject access to a user-owned record when the requester is not its owner.
pub fn ensure_owner(
    entity: &'static str,
    id: DbId,
    owner_id: DbId,
    user_id: DbId,
) -> Result<(), CoreError> {
    if owner_id != user_id {
        return Err(CoreError::Forbidden(format!(
            "{entity} {id} belongs to another user"
        )));
    }
    Ok(())
}
