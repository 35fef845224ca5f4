//! Script line models.
//!
//! Lines are read joined with their speaking character; [`ScriptRow`] is the
//! flat row and [`ScriptLine`] the nested shape sent to clients.

use serde::Serialize;
use sqlx::FromRow;
use taleweave_core::types::DbId;

/// A `scripts` row joined with `characters`.
#[derive(Debug, Clone, FromRow)]
pub struct ScriptRow {
    pub id: DbId,
    pub substory_id: DbId,
    pub line: String,
    pub sort_order: i32,
    pub character_id: DbId,
    pub character_name: String,
    pub character_image: Option<String>,
}

/// The speaking character embedded in a script line.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptCharacter {
    pub id: DbId,
    pub name: String,
    pub image: Option<String>,
}

/// A script line with its character nested under `character`.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptLine {
    pub id: DbId,
    pub substory_id: DbId,
    pub line: String,
    pub sort_order: i32,
    pub character: ScriptCharacter,
}

impl From<ScriptRow> for ScriptLine {
    fn from(row: ScriptRow) -> Self {
        ScriptLine {
            id: row.id,
            substory_id: row.substory_id,
            line: row.line,
            sort_order: row.sort_order,
            character: ScriptCharacter {
                id: row.character_id,
                name: row.character_name,
                image: row.character_image,
            },
        }
    }
}
