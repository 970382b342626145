// ABOUTME: PRD history storage
// ABOUTME: Persists generated PRDs together with the input form that produced them

use chrono::Utc;
use prdforge_core::{PrdInput, PrdRecord};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::{format_timestamp, parse_timestamp, Result, StorageError};

pub struct PrdStorage {
    pool: SqlitePool,
}

impl PrdStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, prd: &PrdRecord) -> Result<PrdRecord> {
        let input_json = serde_json::to_string(&prd.input)?;

        sqlx::query(
            r#"
            INSERT INTO prds (id, title, content, input_json, ai_provider, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&prd.id)
        .bind(&prd.title)
        .bind(&prd.content)
        .bind(&input_json)
        .bind(&prd.ai_provider)
        .bind(format_timestamp(&prd.created_at))
        .bind(format_timestamp(&prd.updated_at))
        .execute(&self.pool)
        .await?;

        debug!("Saved PRD {}", prd.id);
        Ok(prd.clone())
    }

    pub async fn get(&self, id: &str) -> Result<PrdRecord> {
        let row = sqlx::query("SELECT * FROM prds WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("PRD {}", id)))?;

        row_to_prd(&row)
    }

    /// All PRDs, newest first
    pub async fn list(&self) -> Result<Vec<PrdRecord>> {
        let rows = sqlx::query("SELECT * FROM prds ORDER BY created_at DESC, rowid DESC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_prd).collect()
    }

    /// Replace the markdown body, e.g. after a chat revision
    pub async fn update_content(&self, id: &str, content: &str) -> Result<PrdRecord> {
        let result = sqlx::query("UPDATE prds SET content = ?, updated_at = ? WHERE id = ?")
            .bind(content)
            .bind(format_timestamp(&Utc::now()))
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!("PRD {}", id)));
        }

        self.get(id).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM prds WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!("PRD {}", id)));
        }
        Ok(())
    }
}

fn row_to_prd(row: &sqlx::sqlite::SqliteRow) -> Result<PrdRecord> {
    let input_json: String = row.try_get("input_json")?;
    let input: PrdInput = serde_json::from_str(&input_json)?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(PrdRecord {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        input,
        ai_provider: row.try_get("ai_provider")?,
        created_at: parse_timestamp(&created_at, "created_at")?,
        updated_at: parse_timestamp(&updated_at, "updated_at")?,
    })
}
