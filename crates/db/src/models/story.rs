//! Story entity model and detail shape.

use serde::Serialize;
use sqlx::FromRow;
use taleweave_core::types::{DbId, Timestamp};

use crate::models::branch::Branch;
use crate::models::character::Character;

/// A story row from the `stories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Story {
    pub id: DbId,
    pub title: String,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A story with its cast and decision points.
#[derive(Debug, Serialize)]
pub struct StoryDetail {
    #[serde(flatten)]
    pub story: Story,
    pub characters: Vec<Character>,
    pub branches: Vec<Branch>,
}
