// ABOUTME: Storage for saved test case sets
// ABOUTME: Cases are stored as JSON with optional links to the source PRD and PR analysis

use prdforge_core::{TestCase, TestCaseSet};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::{format_timestamp, parse_timestamp, Result, StorageError};

pub struct TestCaseSetStorage {
    pool: SqlitePool,
}

impl TestCaseSetStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, set: &TestCaseSet) -> Result<TestCaseSet> {
        if set.title.trim().is_empty() {
            return Err(StorageError::InvalidInput(
                "Test case set title must not be empty".to_string(),
            ));
        }

        let test_cases_json = serde_json::to_string(&set.test_cases)?;
        let test_types_json = serde_json::to_string(&set.test_types)?;

        sqlx::query(
            r#"
            INSERT INTO test_case_sets (
                id, title, test_cases_json, prd_id, pr_analysis_id, test_types_json, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&set.id)
        .bind(&set.title)
        .bind(&test_cases_json)
        .bind(&set.prd_id)
        .bind(&set.pr_analysis_id)
        .bind(&test_types_json)
        .bind(format_timestamp(&set.created_at))
        .execute(&self.pool)
        .await?;

        debug!(
            "Saved test case set {} with {} cases",
            set.id,
            set.test_cases.len()
        );
        Ok(set.clone())
    }

    pub async fn get(&self, id: &str) -> Result<TestCaseSet> {
        let row = sqlx::query("SELECT * FROM test_case_sets WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Test case set {}", id)))?;

        row_to_set(&row)
    }

    pub async fn list(&self) -> Result<Vec<TestCaseSet>> {
        let rows =
            sqlx::query("SELECT * FROM test_case_sets ORDER BY created_at DESC, rowid DESC")
                .fetch_all(&self.pool)
                .await?;

        rows.iter().map(row_to_set).collect()
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM test_case_sets WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!("Test case set {}", id)));
        }
        Ok(())
    }
}

fn row_to_set(row: &sqlx::sqlite::SqliteRow) -> Result<TestCaseSet> {
    let test_cases_json: String = row.try_get("test_cases_json")?;
    let test_cases: Vec<TestCase> = serde_json::from_str(&test_cases_json)?;
    let test_types_json: String = row.try_get("test_types_json")?;
    let test_types: Vec<String> = serde_json::from_str(&test_types_json)?;
    let created_at: String = row.try_get("created_at")?;

    Ok(TestCaseSet {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        test_cases,
        prd_id: row.try_get("prd_id")?,
        pr_analysis_id: row.try_get("pr_analysis_id")?,
        test_types,
        created_at: parse_timestamp(&created_at, "created_at")?,
    })
}
