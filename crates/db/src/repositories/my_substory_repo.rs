//! Repository for the `my_substories` table.

use sqlx::{PgConnection, PgPool};
use taleweave_core::chain::ChainLink;
use taleweave_core::types::DbId;

use crate::models::my_substory::MySubstory;

const COLUMNS: &str = "id, my_story_id, substory_id, next_id, is_end, created_at";

/// Chain node persistence. Nodes are only ever created as part of a
/// finalization and are removed with their MyStory.
pub struct MySubstoryRepo;

impl MySubstoryRepo {
    /// Insert one chain node.
    pub async fn create(
        conn: &mut PgConnection,
        my_story_id: DbId,
        link: &ChainLink,
    ) -> Result<MySubstory, sqlx::Error> {
        let query = format!(
            "INSERT INTO my_substories (my_story_id, substory_id, is_end)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MySubstory>(&query)
            .bind(my_story_id)
            .bind(link.substory_id)
            .bind(link.is_end)
            .fetch_one(conn)
            .await
    }

    /// Point `id` at `next_id`.
    pub async fn set_next(
        conn: &mut PgConnection,
        id: DbId,
        next_id: DbId,
    ) -> Result<MySubstory, sqlx::Error> {
        let query = format!(
            "UPDATE my_substories SET next_id = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MySubstory>(&query)
            .bind(id)
            .bind(next_id)
            .fetch_one(conn)
            .await
    }

    /// Insert `links` as a linked chain and return the nodes in link order.
    ///
    /// Each node after the first is inserted and then its predecessor's
    /// `next_id` is pointed at it. `links` must be non-empty.
    pub async fn insert_chain(
        conn: &mut PgConnection,
        my_story_id: DbId,
        links: &[ChainLink],
    ) -> Result<Vec<MySubstory>, sqlx::Error> {
        let mut nodes: Vec<MySubstory> = Vec::with_capacity(links.len());

        for link in links {
            let node = Self::create(&mut *conn, my_story_id, link).await?;
            if let Some(prev) = nodes.last_mut() {
                *prev = Self::set_next(&mut *conn, prev.id, node.id).await?;
            }
            nodes.push(node);
        }

        tracing::debug!(my_story_id, nodes = nodes.len(), "Inserted substory chain");
        Ok(nodes)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MySubstory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM my_substories WHERE id = $1");
        sqlx::query_as::<_, MySubstory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Walk the chain from `head_id` following `next_id`, in link order.
    pub async fn list_chain(pool: &PgPool, head_id: DbId) -> Result<Vec<MySubstory>, sqlx::Error> {
        let query = format!(
            "WITH RECURSIVE chain AS (
                SELECT {COLUMNS}, 0 AS position FROM my_substories WHERE id = $1
                UNION ALL
                SELECT m.id, m.my_story_id, m.substory_id, m.next_id, m.is_end, m.created_at,
                       chain.position + 1
                FROM my_substories m
                JOIN chain ON m.id = chain.next_id
             )
             SELECT {COLUMNS} FROM chain ORDER BY position ASC"
        );
        sqlx::query_as::<_, MySubstory>(&query)
            .bind(head_id)
            .fetch_all(pool)
            .await
    }
}
