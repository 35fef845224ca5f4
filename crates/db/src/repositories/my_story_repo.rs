//! Repository for the `my_stories` table.

use sqlx::{PgConnection, PgPool};
use taleweave_core::types::DbId;

use crate::models::my_story::{CreateMyStory, MyStory};

const COLUMNS: &str = "id, user_id, story_id, story_name, finished, is_default, \
    first_substory_id, created_at, updated_at";

/// CRUD for per-user playthroughs plus the finalization update.
pub struct MyStoryRepo;

impl MyStoryRepo {
    /// Insert a new, unfinalized MyStory owned by `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateMyStory,
    ) -> Result<MyStory, sqlx::Error> {
        let query = format!(
            "INSERT INTO my_stories (user_id, story_id, story_name)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MyStory>(&query)
            .bind(user_id)
            .bind(input.story_id)
            .bind(&input.story_name)
            .fetch_one(pool)
            .await
    }

    /// Find a MyStory by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MyStory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM my_stories WHERE id = $1");
        sqlx::query_as::<_, MyStory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's MyStories, newest first, optionally for one story only.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
        story_id: Option<DbId>,
    ) -> Result<Vec<MyStory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM my_stories
             WHERE user_id = $1 AND ($2::BIGINT IS NULL OR story_id = $2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, MyStory>(&query)
            .bind(user_id)
            .bind(story_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a MyStory. Its chain and characters go with it via cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM my_stories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Re-read a MyStory under a row lock for the rest of the transaction.
    pub async fn lock_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<MyStory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM my_stories WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, MyStory>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Point a MyStory at its chain head and set the submission flags.
    pub async fn attach_chain(
        conn: &mut PgConnection,
        id: DbId,
        first_substory_id: DbId,
        finished: bool,
        is_default: bool,
    ) -> Result<MyStory, sqlx::Error> {
        let query = format!(
            "UPDATE my_stories SET
                first_substory_id = $2,
                finished = $3,
                is_default = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MyStory>(&query)
            .bind(id)
            .bind(first_substory_id)
            .bind(finished)
            .bind(is_default)
            .fetch_one(conn)
            .await
    }
}
