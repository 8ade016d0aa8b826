//! Persistence for résumé documents.
//!
//! The document lives whole in a JSONB column; every write replaces it.
//! Scores and rewrites are part of the document, so there is no partial
//! UPDATE surface to keep consistent.

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::resume::{Resume, ResumeRow};

pub async fn list_resumes(pool: &PgPool) -> Result<Vec<ResumeRow>> {
    Ok(
        sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?,
    )
}

pub async fn fetch_resume(pool: &PgPool, id: Uuid) -> Result<Option<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_resume(pool: &PgPool, resume: &Resume, status: &str) -> Result<ResumeRow> {
    let data = serde_json::to_value(resume)?;
    Ok(sqlx::query_as::<_, ResumeRow>(
        "INSERT INTO resumes (id, data, status) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&data)
    .bind(status)
    .fetch_one(pool)
    .await?)
}

/// Replaces a résumé's document, leaving its status untouched.
pub async fn save_document(pool: &PgPool, id: Uuid, resume: &Resume) -> Result<ResumeRow> {
    let data = serde_json::to_value(resume)?;
    Ok(sqlx::query_as::<_, ResumeRow>(
        "UPDATE resumes SET data = $2, updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&data)
    .fetch_one(pool)
    .await?)
}

/// Replaces a résumé's document and moves it to a new status.
pub async fn save_document_with_status(
    pool: &PgPool,
    id: Uuid,
    resume: &Resume,
    status: &str,
) -> Result<ResumeRow> {
    let data = serde_json::to_value(resume)?;
    Ok(sqlx::query_as::<_, ResumeRow>(
        "UPDATE resumes SET data = $2, status = $3, updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&data)
    .bind(status)
    .fetch_one(pool)
    .await?)
}

/// Deletes a résumé. Returns false when the id was unknown.
pub async fn delete_resume(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
