//! Substory model and the scripted view of it.

use serde::Serialize;
use sqlx::FromRow;
use taleweave_core::types::{DbId, Timestamp};

use crate::models::script::ScriptLine;

/// A substory row from the `substories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Substory {
    pub id: DbId,
    pub story_id: DbId,
    /// The decision point this segment is an option of, if any.
    pub branch_id: Option<DbId>,
    pub title: String,
    pub content: Option<String>,
    pub image: Option<String>,
    pub sort_order: i32,
    pub is_end: bool,
    pub created_at: Timestamp,
}

/// A substory with its script lines in order.
#[derive(Debug, Clone, Serialize)]
pub struct SubstoryWithScripts {
    #[serde(flatten)]
    pub substory: Substory,
    pub scripts: Vec<ScriptLine>,
}
