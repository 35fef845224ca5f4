//! Repository for the `my_characters` table.

use sqlx::PgPool;
use taleweave_core::types::DbId;

use crate::models::my_character::{CreateMyCharacter, MyCharacter, MyCharacterBasic};

const COLUMNS: &str = "id, my_story_id, character_id, name, image, created_at";

/// Character assignments within a MyStory.
pub struct MyCharacterRepo;

impl MyCharacterRepo {
    /// Insert a new assignment, returning the created row.
    pub async fn create(
        pool: &PgPool,
        my_story_id: DbId,
        input: &CreateMyCharacter,
    ) -> Result<MyCharacter, sqlx::Error> {
        let query = format!(
            "INSERT INTO my_characters (my_story_id, character_id, name, image)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MyCharacter>(&query)
            .bind(my_story_id)
            .bind(input.character_id)
            .bind(&input.name)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MyCharacter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM my_characters WHERE id = $1");
        sqlx::query_as::<_, MyCharacter>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the assignments of a MyStory, oldest first.
    pub async fn list_by_my_story(
        pool: &PgPool,
        my_story_id: DbId,
    ) -> Result<Vec<MyCharacter>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM my_characters
             WHERE my_story_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, MyCharacter>(&query)
            .bind(my_story_id)
            .fetch_all(pool)
            .await
    }

    /// Compact assignments of a MyStory for the given canonical characters,
    /// oldest first so that later assignments override earlier ones.
    pub async fn list_basic_for_characters(
        pool: &PgPool,
        my_story_id: DbId,
        character_ids: &[DbId],
    ) -> Result<Vec<MyCharacterBasic>, sqlx::Error> {
        sqlx::query_as::<_, MyCharacterBasic>(
            "SELECT id, character_id, name, image FROM my_characters
             WHERE my_story_id = $1 AND character_id = ANY($2)
             ORDER BY created_at ASC, id ASC",
        )
        .bind(my_story_id)
        .bind(character_ids)
        .fetch_all(pool)
        .await
    }
}
