//! Repository for the `scripts` table.

use sqlx::PgPool;
use taleweave_core::types::DbId;

use crate::models::script::{ScriptLine, ScriptRow};

const SELECT_JOINED: &str = "SELECT s.id, s.substory_id, s.line, s.sort_order, \
     c.id AS character_id, c.name AS character_name, c.image AS character_image \
     FROM scripts s JOIN characters c ON c.id = s.character_id";

/// Read access to substory script lines.
pub struct ScriptRepo;

impl ScriptRepo {
    /// List the lines of one substory in reading order.
    pub async fn list_by_substory(
        pool: &PgPool,
        substory_id: DbId,
    ) -> Result<Vec<ScriptLine>, sqlx::Error> {
        let query = format!(
            "{SELECT_JOINED} WHERE s.substory_id = $1 ORDER BY s.sort_order ASC, s.id ASC"
        );
        let rows = sqlx::query_as::<_, ScriptRow>(&query)
            .bind(substory_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(ScriptLine::from).collect())
    }

    /// List the lines of several substories, grouped by substory then
    /// reading order.
    pub async fn list_by_substories(
        pool: &PgPool,
        substory_ids: &[DbId],
    ) -> Result<Vec<ScriptLine>, sqlx::Error> {
        let query = format!(
            "{SELECT_JOINED} WHERE s.substory_id = ANY($1) \
             ORDER BY s.substory_id ASC, s.sort_order ASC, s.id ASC"
        );
        let rows = sqlx::query_as::<_, ScriptRow>(&query)
            .bind(substory_ids)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(ScriptLine::from).collect())
    }
}
