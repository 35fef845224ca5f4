//! Repository for the `stories` table.

use sqlx::PgPool;
use taleweave_core::types::DbId;

use crate::models::story::Story;

const COLUMNS: &str = "id, title, summary, image, created_at, updated_at";

/// Read access to the story catalog.
pub struct StoryRepo;

impl StoryRepo {
    /// List every story, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories ORDER BY id ASC");
        sqlx::query_as::<_, Story>(&query).fetch_all(pool).await
    }

    /// Find a story by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories WHERE id = $1");
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM stories WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
