//! Repository for the `characters` table.

use sqlx::PgPool;
use taleweave_core::types::DbId;

use crate::models::character::Character;

const COLUMNS: &str = "id, story_id, name, description, image, created_at";

/// Read access to a story's canonical characters.
pub struct CharacterRepo;

impl CharacterRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the characters of a story in creation order.
    pub async fn list_by_story(
        pool: &PgPool,
        story_id: DbId,
    ) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE story_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Character>(&query)
            .bind(story_id)
            .fetch_all(pool)
            .await
    }

    /// List the characters of several stories, grouped by story then id.
    pub async fn list_by_stories(
        pool: &PgPool,
        story_ids: &[DbId],
    ) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE story_id = ANY($1)
             ORDER BY story_id ASC, id ASC"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(story_ids)
            .fetch_all(pool)
            .await
    }
}
