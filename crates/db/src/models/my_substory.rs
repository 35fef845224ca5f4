//! MySubstory (chain node) model and detail shape.

use serde::Serialize;
use sqlx::FromRow;
use taleweave_core::chain::ChainNode;
use taleweave_core::types::{DbId, Timestamp};

use crate::models::substory::{Substory, SubstoryWithScripts};

/// A row from the `my_substories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MySubstory {
    pub id: DbId,
    pub my_story_id: DbId,
    pub substory_id: DbId,
    pub next_id: Option<DbId>,
    pub is_end: bool,
    pub created_at: Timestamp,
}

impl From<&MySubstory> for ChainNode {
    fn from(node: &MySubstory) -> Self {
        ChainNode {
            id: node.id,
            substory_id: node.substory_id,
            next_id: node.next_id,
            is_end: node.is_end,
        }
    }
}

/// A chain node with its substory, used in chain listings.
#[derive(Debug, Serialize)]
pub struct MySubstoryEntry {
    #[serde(flatten)]
    pub node: MySubstory,
    pub substory: Substory,
}

/// A chain node with its substory and script lines.
#[derive(Debug, Serialize)]
pub struct MySubstoryDetail {
    #[serde(flatten)]
    pub node: MySubstory,
    pub substory: SubstoryWithScripts,
}
