//! Axum route handlers for résumé CRUD.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeRecord, STATUS_DRAFT};
use crate::resumes::merge::deep_merge;
use crate::resumes::store;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ListResumesResponse {
    pub count: usize,
    pub resumes: Vec<ResumeRecord>,
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<ListResumesResponse>, AppError> {
    let rows = store::list_resumes(&state.db).await?;
    let resumes = rows
        .into_iter()
        .map(|row| row.into_record())
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Json(ListResumesResponse {
        count: resumes.len(),
        resumes,
    }))
}

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Json(mut resume): Json<Resume>,
) -> Result<(StatusCode, Json<ResumeRecord>), AppError> {
    resume.validate().map_err(AppError::Validation)?;
    resume.apply_word_counts();

    let row = store::insert_resume(&state.db, &resume, STATUS_DRAFT).await?;
    Ok((StatusCode::CREATED, Json(row.into_record()?)))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRecord>, AppError> {
    let row = store::fetch_resume(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(Json(row.into_record()?))
}

/// PUT /api/v1/resumes/:id
///
/// Partial update: the body is deep-merged into the stored document, so a
/// live-preview save of one field leaves the rest of the section intact.
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<Value>,
) -> Result<Json<ResumeRecord>, AppError> {
    let row = store::fetch_resume(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    let mut data = row.data;
    deep_merge(&mut data, patch);

    let mut resume: Resume = serde_json::from_value(data)
        .map_err(|e| AppError::Validation(format!("merged document is not a valid resume: {e}")))?;
    resume.apply_word_counts();

    let row = store::save_document(&state.db, id, &resume).await?;
    Ok(Json(row.into_record()?))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if store::delete_resume(&state.db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Resume {id} not found")))
    }
}
