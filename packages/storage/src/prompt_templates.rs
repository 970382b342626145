// ABOUTME: Prompt template storage with version history
// ABOUTME: Seeds built-in templates, applies edits transactionally, and keeps one active template per kind

use prdforge_prompts::{default_prompt, PromptKind, PromptTemplate, PromptVersion};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::{format_timestamp, parse_timestamp, Result, StorageError};

pub struct PromptTemplateStorage {
    pool: SqlitePool,
}

impl PromptTemplateStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the built-in template for every kind that has none yet.
    /// Returns how many templates were created.
    pub async fn seed_defaults(&self) -> Result<usize> {
        let mut seeded = 0;

        for kind in PromptKind::ALL {
            let (count,): (i64,) =
                sqlx::query_as("SELECT COUNT(*) FROM prompt_templates WHERE kind = ?")
                    .bind(kind.as_str())
                    .fetch_one(&self.pool)
                    .await?;

            if count > 0 {
                continue;
            }

            let prompt = default_prompt(kind)
                .map_err(|e| StorageError::InvalidInput(e.to_string()))?;
            let template = PromptTemplate::from_default(kind, &prompt);
            self.insert(&template).await?;
            seeded += 1;
        }

        if seeded > 0 {
            info!("Seeded {} default prompt templates", seeded);
        }
        Ok(seeded)
    }

    async fn insert(&self, template: &PromptTemplate) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO prompt_templates (
                id, name, kind, content, description, is_active, version, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&template.id)
        .bind(&template.name)
        .bind(template.kind.as_str())
        .bind(&template.content)
        .bind(&template.description)
        .bind(template.is_active)
        .bind(template.version)
        .bind(format_timestamp(&template.created_at))
        .bind(format_timestamp(&template.updated_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<PromptTemplate>> {
        let rows = sqlx::query("SELECT * FROM prompt_templates ORDER BY kind, created_at")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_template).collect()
    }

    pub async fn get(&self, id: &str) -> Result<PromptTemplate> {
        let row = sqlx::query("SELECT * FROM prompt_templates WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Prompt template {}", id)))?;

        row_to_template(&row)
    }

    /// The active template of a kind, if one is stored
    pub async fn active_for_kind(&self, kind: PromptKind) -> Result<Option<PromptTemplate>> {
        let row =
            sqlx::query("SELECT * FROM prompt_templates WHERE kind = ? AND is_active = 1")
                .bind(kind.as_str())
                .fetch_optional(&self.pool)
                .await?;

        row.as_ref().map(row_to_template).transpose()
    }

    /// Replace a template's body. The previous body is appended to the history
    /// and the version is incremented by exactly one.
    pub async fn update(
        &self,
        id: &str,
        content: String,
        change_note: Option<String>,
    ) -> Result<PromptTemplate> {
        if content.trim().is_empty() {
            return Err(StorageError::InvalidInput(
                "Prompt content must not be empty".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT * FROM prompt_templates WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Prompt template {}", id)))?;
        let mut template = row_to_template(&row)?;

        let previous = template.apply_edit(content, change_note);

        sqlx::query(
            r#"
            INSERT INTO prompt_template_versions (template_id, version, content, change_note, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&previous.template_id)
        .bind(previous.version)
        .bind(&previous.content)
        .bind(&previous.change_note)
        .bind(format_timestamp(&previous.created_at))
        .execute(&mut *tx)
        .await?;

        // Guard on the version we read so concurrent edits cannot skip a number
        let result = sqlx::query(
            "UPDATE prompt_templates SET content = ?, version = ?, updated_at = ? WHERE id = ? AND version = ?",
        )
        .bind(&template.content)
        .bind(template.version)
        .bind(format_timestamp(&template.updated_at))
        .bind(id)
        .bind(previous.version)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::Database(format!(
                "Prompt template {} was modified concurrently",
                id
            )));
        }

        tx.commit().await?;

        debug!("Prompt template {} updated to version {}", id, template.version);
        Ok(template)
    }

    /// Store an inactive copy of a template, ready to be edited and activated
    pub async fn duplicate(&self, id: &str) -> Result<PromptTemplate> {
        let copy = self.get(id).await?.duplicate();
        self.insert(&copy).await?;

        debug!("Duplicated prompt template {} as {}", id, copy.id);
        Ok(copy)
    }

    /// Make a template the only active one of its kind
    pub async fn activate(&self, id: &str) -> Result<PromptTemplate> {
        let mut tx = self.pool.begin().await?;

        let kind: String = sqlx::query("SELECT kind FROM prompt_templates WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Prompt template {}", id)))?
            .try_get("kind")?;

        sqlx::query("UPDATE prompt_templates SET is_active = 0 WHERE kind = ? AND is_active = 1")
            .bind(&kind)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE prompt_templates SET is_active = 1 WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!("Activated prompt template {} for {}", id, kind);
        self.get(id).await
    }

    /// Prior versions of a template, newest first
    pub async fn history(&self, id: &str) -> Result<Vec<PromptVersion>> {
        // Distinguish "no history yet" from an unknown template
        self.get(id).await?;

        let rows = sqlx::query(
            "SELECT * FROM prompt_template_versions WHERE template_id = ? ORDER BY version DESC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let created_at: String = row.try_get("created_at")?;
                Ok(PromptVersion {
                    template_id: row.try_get("template_id")?,
                    version: row.try_get("version")?,
                    content: row.try_get("content")?,
                    change_note: row.try_get("change_note")?,
                    created_at: parse_timestamp(&created_at, "created_at")?,
                })
            })
            .collect()
    }
}

fn row_to_template(row: &sqlx::sqlite::SqliteRow) -> Result<PromptTemplate> {
    let kind: String = row.try_get("kind")?;
    let kind = kind
        .parse::<PromptKind>()
        .map_err(|e| StorageError::Database(e.to_string()))?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(PromptTemplate {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        kind,
        content: row.try_get("content")?,
        description: row.try_get("description")?,
        is_active: row.try_get("is_active")?,
        version: row.try_get("version")?,
        created_at: parse_timestamp(&created_at, "created_at")?,
        updated_at: parse_timestamp(&updated_at, "updated_at")?,
    })
}
