//! Canonical character model.

use serde::Serialize;
use sqlx::FromRow;
use taleweave_core::types::{DbId, Timestamp};

/// A character row from the `characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub story_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created_at: Timestamp,
}
