//! Branch (decision point) model and detail shape.

use serde::Serialize;
use sqlx::FromRow;
use taleweave_core::types::{DbId, Timestamp};

use crate::models::substory::Substory;

/// A branch row from the `branches` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Branch {
    pub id: DbId,
    pub story_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

/// A branch together with the substories offered as its options.
#[derive(Debug, Serialize)]
pub struct BranchDetail {
    #[serde(flatten)]
    pub branch: Branch,
    pub substories: Vec<Substory>,
}
