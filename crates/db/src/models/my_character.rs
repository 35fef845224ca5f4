//! MyCharacter model, DTOs, and response shapes.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taleweave_core::types::{DbId, Timestamp};
use validator::Validate;

use crate::models::character::Character;

/// A row from the `my_characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MyCharacter {
    pub id: DbId,
    pub my_story_id: DbId,
    pub character_id: DbId,
    pub name: String,
    pub image: Option<String>,
    pub created_at: Timestamp,
}

/// The compact form attached to script lines by the character overlay.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MyCharacterBasic {
    pub id: DbId,
    pub character_id: DbId,
    pub name: String,
    pub image: Option<String>,
}

/// A MyCharacter together with the canonical character it stands in for.
#[derive(Debug, Serialize)]
pub struct MyCharacterDetail {
    #[serde(flatten)]
    pub my_character: MyCharacter,
    pub character: Character,
}

/// Body of `POST /mystories/{id}/characters`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMyCharacter {
    #[validate(range(min = 1))]
    pub character_id: DbId,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 500))]
    pub image: Option<String>,
}
