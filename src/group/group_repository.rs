use crate::error::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::group_models::{GroupRecord, GroupSummary};

#[derive(Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whole-document upsert. The database serializes writes per key, so
    /// each overwrite is atomic; concurrent writers to the same group id
    /// resolve last-writer-wins at document granularity.
    pub async fn upsert(
        &self,
        group_id: &str,
        document: &serde_json::Value,
    ) -> Result<GroupRecord> {
        let record = sqlx::query_as::<_, GroupRecord>(
            "INSERT INTO gift_groups (group_id, document)
             VALUES ($1, $2)
             ON CONFLICT (group_id)
             DO UPDATE SET document = EXCLUDED.document, updated_at = NOW()
             RETURNING *",
        )
        .bind(group_id)
        .bind(document)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn find_by_id(&self, group_id: &str) -> Result<Option<GroupRecord>> {
        let record = sqlx::query_as::<_, GroupRecord>(
            "SELECT * FROM gift_groups WHERE group_id = $1",
        )
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn delete(&self, group_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM gift_groups WHERE group_id = $1")
            .bind(group_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Bulk-removes groups whose last write is older than the cutoff.
    /// One statement, safe to run concurrently with ordinary reads and
    /// writes since it only touches already-stale rows.
    pub async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM gift_groups WHERE updated_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn list_summaries(&self) -> Result<Vec<GroupSummary>> {
        let summaries = sqlx::query_as::<_, GroupSummary>(
            "SELECT group_id, document->>'groupName' AS group_name, created_at, updated_at
             FROM gift_groups
             ORDER BY updated_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }
}
