//! Substory chain planning for MyStory finalization.
//!
//! A finalized MyStory points at the head of a singly linked list of
//! `my_substories` rows. This module turns the caller's ordered selection
//! into the list of links to insert and checks the tail invariant on a
//! persisted chain.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Upper bound on the number of substories a single finalization may chain.
pub const MAX_CHAIN_LENGTH: usize = 500;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One planned node of a MySubstory chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChainLink {
    pub substory_id: DbId,
    pub is_end: bool,
}

/// The persisted shape of a chain node, as read back from the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainNode {
    pub id: DbId,
    pub substory_id: DbId,
    pub next_id: Option<DbId>,
    pub is_end: bool,
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// Plan the links for an ordered substory selection.
///
/// Every link except the last is `is_end = false`; the last one is the tail.
/// A single-element selection yields one link that is both head and tail.
pub fn plan_chain(substory_ids: &[DbId]) -> Result<Vec<ChainLink>, CoreError> {
    if substory_ids.is_empty() {
        return Err(CoreError::Validation(
            "substory_list must contain at least one substory id".to_string(),
        ));
    }
    if substory_ids.len() > MAX_CHAIN_LENGTH {
        return Err(CoreError::Validation(format!(
            "substory_list must not exceed {MAX_CHAIN_LENGTH} entries, got {}",
            substory_ids.len()
        )));
    }
    if let Some(bad) = substory_ids.iter().find(|id| **id <= 0) {
        return Err(CoreError::Validation(format!(
            "substory_list contains an invalid id: {bad}"
        )));
    }

    let last = substory_ids.len() - 1;
    Ok(substory_ids
        .iter()
        .enumerate()
        .map(|(idx, &substory_id)| ChainLink {
            substory_id,
            is_end: idx == last,
        })
        .collect())
}

/// Return the ids in `requested` that are not in `known`, in request order.
///
/// Used to reject selections that name substories from another story.
pub fn unknown_substories(requested: &[DbId], known: &[DbId]) -> Vec<DbId> {
    let mut missing: Vec<DbId> = requested
        .iter()
        .copied()
        .filter(|id| !known.contains(id))
        .collect();
    missing.dedup();
    missing
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Check that `nodes`, given in link order, form a well-terminated chain.
///
/// Each node must point at its successor, only the last node may have
/// `next_id = None`, and exactly that node is end-marked.
pub fn verify_chain(nodes: &[ChainNode]) -> Result<(), CoreError> {
    let Some((tail, body)) = nodes.split_last() else {
        return Err(CoreError::Internal("chain is empty".to_string()));
    };

    for (idx, node) in body.iter().enumerate() {
        let successor = nodes[idx + 1].id;
        if node.next_id != Some(successor) {
            return Err(CoreError::Internal(format!(
                "chain node {} does not link to {successor}",
                node.id
            )));
        }
        if node.is_end {
            return Err(CoreError::Internal(format!(
                "intermediate chain node {} is end-marked",
                node.id
            )));
        }
    }

    if tail.next_id.is_some() || !tail.is_end {
        return Err(CoreError::Internal(format!(
            "chain tail {} is not terminated",
            tail.id
        )));
    }
    Ok(())
}
