//! Repository for the `substories` table.

use sqlx::PgPool;
use taleweave_core::types::DbId;

use crate::models::substory::Substory;

const COLUMNS: &str =
    "id, story_id, branch_id, title, content, image, sort_order, is_end, created_at";

/// Read access to authored narrative segments.
pub struct SubstoryRepo;

impl SubstoryRepo {
    /// Find a substory by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Substory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM substories WHERE id = $1");
        sqlx::query_as::<_, Substory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the substories of a story ordered by `sort_order`.
    pub async fn list_by_story(
        pool: &PgPool,
        story_id: DbId,
    ) -> Result<Vec<Substory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM substories
             WHERE story_id = $1
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Substory>(&query)
            .bind(story_id)
            .fetch_all(pool)
            .await
    }

    /// List the options offered at a branch.
    pub async fn list_by_branch(
        pool: &PgPool,
        branch_id: DbId,
    ) -> Result<Vec<Substory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM substories
             WHERE branch_id = $1
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Substory>(&query)
            .bind(branch_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch several substories at once, in no particular order.
    pub async fn list_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Substory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM substories WHERE id = ANY($1)");
        sqlx::query_as::<_, Substory>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Return which of `ids` are substories of `story_id`.
    pub async fn filter_ids_in_story(
        pool: &PgPool,
        story_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM substories WHERE story_id = $1 AND id = ANY($2)",
        )
        .bind(story_id)
        .bind(ids)
        .fetch_all(pool)
        .await
    }
}
