// ABOUTME: API usage storage layer using SQLite
// ABOUTME: Upserts daily counters, prunes rows older than the retention window, and aggregates

use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::{UsageRecord, UsageSummary};
use prdforge_storage::StorageError;

/// Days of usage history kept
pub const RETENTION_DAYS: i64 = 30;

pub struct UsageStorage {
    pool: SqlitePool,
}

impl UsageStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record one request against today's bucket
    pub async fn track(
        &self,
        service: &str,
        endpoint: &str,
        tokens_used: u64,
        is_error: bool,
        cost: f64,
    ) -> Result<(), StorageError> {
        self.track_at(Utc::now(), service, endpoint, tokens_used, is_error, cost)
            .await
    }

    pub async fn track_at(
        &self,
        now: DateTime<Utc>,
        service: &str,
        endpoint: &str,
        tokens_used: u64,
        is_error: bool,
        cost: f64,
    ) -> Result<(), StorageError> {
        let today = now.date_naive();
        let tokens = i64::try_from(tokens_used)
            .map_err(|_| StorageError::InvalidInput("Token count out of range".to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO api_usage (
                usage_date, service, endpoint, request_count, tokens_used, error_count, total_cost, last_used
            ) VALUES (?, ?, ?, 1, ?, ?, ?, ?)
            ON CONFLICT(usage_date, service, endpoint) DO UPDATE SET
                request_count = request_count + 1,
                tokens_used = tokens_used + excluded.tokens_used,
                error_count = error_count + excluded.error_count,
                total_cost = total_cost + excluded.total_cost,
                last_used = excluded.last_used
            "#,
        )
        .bind(today.to_string())
        .bind(service)
        .bind(endpoint)
        .bind(tokens)
        .bind(i64::from(is_error))
        .bind(cost)
        .bind(now.to_rfc3339_opts(SecondsFormat::Micros, true))
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        let cutoff = today - Duration::days(RETENTION_DAYS);
        let pruned = sqlx::query("DELETE FROM api_usage WHERE usage_date <= ?")
            .bind(cutoff.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?
            .rows_affected();

        debug!(
            "Tracked {} {} (tokens={}, error={}, pruned={})",
            service, endpoint, tokens_used, is_error, pruned
        );
        Ok(())
    }

    /// All stored buckets, newest day first
    pub async fn list(&self) -> Result<Vec<UsageRecord>, StorageError> {
        let rows = sqlx::query(
            "SELECT * FROM api_usage ORDER BY usage_date DESC, service ASC, endpoint ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_record).collect()
    }

    pub async fn summary(&self) -> Result<UsageSummary, StorageError> {
        Ok(UsageSummary::from_records(self.list().await?))
    }

    /// Delete every bucket and return how many were removed
    pub async fn reset(&self) -> Result<u64, StorageError> {
        let result = sqlx::query("DELETE FROM api_usage")
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;
        Ok(result.rows_affected())
    }
}

fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<UsageRecord, StorageError> {
    let date_str: String = row.try_get("usage_date").map_err(StorageError::Sqlx)?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|e| StorageError::Database(format!("Failed to parse usage_date: {}", e)))?;
    let last_used_str: String = row.try_get("last_used").map_err(StorageError::Sqlx)?;
    let last_used = DateTime::parse_from_rfc3339(&last_used_str)
        .map_err(|e| StorageError::Database(format!("Failed to parse last_used timestamp: {}", e)))?
        .with_timezone(&Utc);

    Ok(UsageRecord {
        date,
        service: row.try_get("service").map_err(StorageError::Sqlx)?,
        endpoint: row.try_get("endpoint").map_err(StorageError::Sqlx)?,
        request_count: row.try_get("request_count").map_err(StorageError::Sqlx)?,
        tokens_used: row.try_get("tokens_used").map_err(StorageError::Sqlx)?,
        error_count: row.try_get("error_count").map_err(StorageError::Sqlx)?,
        total_cost: row.try_get("total_cost").map_err(StorageError::Sqlx)?,
        last_used,
    })
}
