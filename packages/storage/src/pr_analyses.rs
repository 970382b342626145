// ABOUTME: PR analysis history storage
// ABOUTME: Keeps the fetched pull request metadata next to the generated analysis

use prdforge_core::{PrAnalysisRecord, PullRequestData};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::{format_timestamp, parse_timestamp, Result, StorageError};

pub struct PrAnalysisStorage {
    pool: SqlitePool,
}

impl PrAnalysisStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, analysis: &PrAnalysisRecord) -> Result<PrAnalysisRecord> {
        let pr_data_json = serde_json::to_string(&analysis.pr_data)?;

        sqlx::query(
            r#"
            INSERT INTO pr_analyses (id, url, title, pr_data_json, analysis, ai_provider, analyzed_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&analysis.id)
        .bind(&analysis.url)
        .bind(&analysis.title)
        .bind(&pr_data_json)
        .bind(&analysis.analysis)
        .bind(&analysis.ai_provider)
        .bind(format_timestamp(&analysis.analyzed_at))
        .execute(&self.pool)
        .await?;

        debug!("Saved PR analysis {} for {}", analysis.id, analysis.url);
        Ok(analysis.clone())
    }

    pub async fn get(&self, id: &str) -> Result<PrAnalysisRecord> {
        let row = sqlx::query("SELECT * FROM pr_analyses WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("PR analysis {}", id)))?;

        row_to_analysis(&row)
    }

    pub async fn list(&self) -> Result<Vec<PrAnalysisRecord>> {
        let rows =
            sqlx::query("SELECT * FROM pr_analyses ORDER BY analyzed_at DESC, rowid DESC")
                .fetch_all(&self.pool)
                .await?;

        rows.iter().map(row_to_analysis).collect()
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM pr_analyses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!("PR analysis {}", id)));
        }
        Ok(())
    }
}

fn row_to_analysis(row: &sqlx::sqlite::SqliteRow) -> Result<PrAnalysisRecord> {
    let pr_data_json: String = row.try_get("pr_data_json")?;
    let pr_data: PullRequestData = serde_json::from_str(&pr_data_json)?;
    let analyzed_at: String = row.try_get("analyzed_at")?;

    Ok(PrAnalysisRecord {
        id: row.try_get("id")?,
        url: row.try_get("url")?,
        title: row.try_get("title")?,
        pr_data,
        analysis: row.try_get("analysis")?,
        ai_provider: row.try_get("ai_provider")?,
        analyzed_at: parse_timestamp(&analyzed_at, "analyzed_at")?,
    })
}
