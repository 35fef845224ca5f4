//! Character overlay for substory script lines.
//!
//! A substory's script lines each reference a canonical character. When a
//! user has assigned their own characters for that canonical character within
//! a MyStory, the line is returned with those assignments attached under
//! `mycharacter` as an array; otherwise `mycharacter` is an empty JSON object.

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::types::DbId;

/// The `mycharacter` slot of an overlaid line.
///
/// Serializes as an array of assignments, or as `{}` when there are none.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterSlot<C>(pub Vec<C>);

impl<C> CharacterSlot<C> {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<C: Serialize> Serialize for CharacterSlot<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.is_empty() {
            serializer.serialize_map(Some(0))?.end()
        } else {
            self.0.serialize(serializer)
        }
    }
}

/// A script line with the user's character assignments attached.
#[derive(Debug, Clone, Serialize)]
pub struct OverlaidLine<L, C> {
    #[serde(flatten)]
    pub line: L,
    pub mycharacter: CharacterSlot<C>,
}

/// Attach the user's assignments to each line.
///
/// Every assignment for a line's character is attached, keeping the order of
/// `assignments` (callers pass them oldest first).
pub fn overlay_lines<L, C, FL, FC>(
    lines: Vec<L>,
    assignments: Vec<C>,
    line_character: FL,
    assigned_character: FC,
) -> Vec<OverlaidLine<L, C>>
where
    C: Clone,
    FL: Fn(&L) -> DbId,
    FC: Fn(&C) -> DbId,
{
    let mut by_character: HashMap<DbId, Vec<C>> = HashMap::new();
    for assigned in assignments {
        by_character
            .entry(assigned_character(&assigned))
            .or_default()
            .push(assigned);
    }

    lines
        .into_iter()
        .map(|line| {
            let slot = by_character
                .get(&line_character(&line))
                .cloned()
                .unwrap_or_default();
            OverlaidLine {
                line,
                mycharacter: CharacterSlot(slot),
            }
        })
        .collect()
}
