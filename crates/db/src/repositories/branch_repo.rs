//! Repository for the `branches` table.

use sqlx::PgPool;
use taleweave_core::types::DbId;

use crate::models::branch::Branch;

const COLUMNS: &str = "id, story_id, name, description, sort_order, created_at";

/// Read access to a story's decision points.
pub struct BranchRepo;

impl BranchRepo {
    /// Find a branch by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Branch>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM branches WHERE id = $1");
        sqlx::query_as::<_, Branch>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all branches of a story in presentation order.
    pub async fn list_by_story(pool: &PgPool, story_id: DbId) -> Result<Vec<Branch>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM branches
             WHERE story_id = $1
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Branch>(&query)
            .bind(story_id)
            .fetch_all(pool)
            .await
    }

    /// List the branches of several stories, each story's in presentation order.
    pub async fn list_by_stories(
        pool: &PgPool,
        story_ids: &[DbId],
    ) -> Result<Vec<Branch>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM branches
             WHERE story_id = ANY($1)
             ORDER BY story_id ASC, sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Branch>(&query)
            .bind(story_ids)
            .fetch_all(pool)
            .await
    }
}
