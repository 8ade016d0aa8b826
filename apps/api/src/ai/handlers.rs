//! Axum route handlers for the AI endpoints.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::ai::jd_analysis::{analyze_jd, JdAnalysis};
use crate::ai::optimize::{optimize_resume, OptimizeOutcome};
use crate::ai::rewrite::rewrite_bullet;
use crate::ai::summary::generate_summary;
use crate::ats::keywords::KeywordSet;
use crate::ats::resume_text::{build_resume_text, BulletTextMode};
use crate::ats::scoring::ScoreResult;
use crate::errors::AppError;
use crate::models::resume::{AtsData, BulletPoint, Resume, STATUS_OPTIMIZING};
use crate::resumes::store;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeJdRequest {
    pub jd_text: String,
    pub resume_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeJdResponse {
    pub keywords: JdAnalysis,
    pub total_keywords: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub resume_id: Option<Uuid>,
    pub target_keywords: Option<KeywordSet>,
    pub resume_data: Option<Resume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteRequest {
    pub bullet_point: Option<String>,
    pub keyword: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub context: Option<String>,
    pub resume_id: Option<Uuid>,
    pub experience_index: Option<usize>,
    pub bullet_index: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteResponse {
    pub original: String,
    pub rewritten: String,
    pub injected_keyword: String,
    pub word_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletDecisionRequest {
    pub resume_id: Uuid,
    pub experience_index: usize,
    pub bullet_index: usize,
    pub accept: bool,
}

#[derive(Debug, Serialize)]
pub struct BulletDecisionResponse {
    pub accepted: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub resume_id: Option<Uuid>,
    pub resume_data: Option<Resume>,
    pub target_keywords: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    pub resume_id: Uuid,
    pub jd_text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ai/analyze-jd
///
/// Extracts categorized keywords from a job description. With a resumeId,
/// the keywords are also persisted onto that résumé's ATS data so later
/// scoring calls can reuse them.
pub async fn handle_analyze_jd(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeJdRequest>,
) -> Result<Json<AnalyzeJdResponse>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Please provide job description text".to_string(),
        ));
    }

    let analysis = analyze_jd(&request.jd_text, &state.llm).await?;

    if let Some(resume_id) = request.resume_id {
        let row = store::fetch_resume(&state.db, resume_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
        let mut resume = row.document()?;
        let ats = resume.ats_data.get_or_insert_with(AtsData::default);
        ats.target_jd = Some(request.jd_text.clone());
        ats.extracted_keywords = analysis.to_keyword_set();
        ats.last_analyzed = Some(Utc::now());
        store::save_document(&state.db, resume_id, &resume).await?;
    }

    Ok(Json(AnalyzeJdResponse {
        total_keywords: analysis.total_keywords(),
        keywords: analysis,
    }))
}

/// POST /api/v1/ai/score
///
/// Scores a résumé against target keywords. The résumé comes from the
/// store (by id) or inline; keywords come from the request or from the
/// résumé's stored extraction. When scoring a stored résumé, the result is
/// persisted with `previousScore` holding the score it replaces.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResult>, AppError> {
    let mut keywords = request.target_keywords;
    let mut stored: Option<(Uuid, Resume)> = None;

    if let Some(resume_id) = request.resume_id {
        let row = store::fetch_resume(&state.db, resume_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
        let resume = row.document()?;
        if keywords.is_none() {
            keywords = resume
                .ats_data
                .as_ref()
                .map(|ats| ats.extracted_keywords.clone());
        }
        stored = Some((resume_id, resume));
    }

    let keywords = keywords.ok_or_else(|| {
        AppError::Validation("No keywords provided. Run JD analysis first.".to_string())
    })?;

    let resume = match &stored {
        Some((_, resume)) => resume,
        None => request.resume_data.as_ref().ok_or_else(|| {
            AppError::Validation("Provide resumeId or resumeData".to_string())
        })?,
    };

    let resume_text = build_resume_text(resume, BulletTextMode::AcceptedOnly);
    debug!(
        "scoring {} chars of resume text against {} keywords",
        resume_text.len(),
        keywords.total()
    );
    let result = state.scorer.score(&resume_text, &keywords);

    if let Some((resume_id, mut resume)) = stored {
        let ats = resume.ats_data.get_or_insert_with(AtsData::default);
        ats.previous_score = Some(ats.ats_score);
        ats.ats_score = result.ats_score;
        ats.matched_keywords = result.matched_keywords.clone();
        ats.missing_keywords = result.missing_keywords.clone();
        ats.suggestions = result.suggestions.clone();
        store::save_document(&state.db, resume_id, &resume).await?;
    }

    Ok(Json(result))
}

/// POST /api/v1/ai/rewrite
///
/// Rewrites a single bullet point around a target keyword. When the
/// résumé/bullet coordinates are supplied and resolve, the rewrite is
/// stored on the bullet, pending the user's accept/reject decision.
pub async fn handle_rewrite(
    State(state): State<AppState>,
    Json(request): Json<RewriteRequest>,
) -> Result<Json<RewriteResponse>, AppError> {
    let bullet_point = request.bullet_point.as_deref().unwrap_or("").trim();
    if bullet_point.is_empty() {
        return Err(AppError::Validation(
            "Please provide a bullet point to rewrite".to_string(),
        ));
    }

    let target_keyword = request
        .keyword
        .clone()
        .or_else(|| {
            request
                .keywords
                .as_ref()
                .and_then(|keywords| keywords.first().cloned())
        })
        .unwrap_or_default();

    let rewritten = rewrite_bullet(
        bullet_point,
        &target_keyword,
        request.context.as_deref(),
        &state.llm,
    )
    .await?;

    if let (Some(resume_id), Some(experience_index), Some(bullet_index)) = (
        request.resume_id,
        request.experience_index,
        request.bullet_index,
    ) {
        if let Some(row) = store::fetch_resume(&state.db, resume_id).await? {
            let mut resume = row.document()?;
            if let Some(bullet) = bullet_at_mut(&mut resume, experience_index, bullet_index) {
                bullet.rewritten = Some(rewritten.text.clone());
                bullet.is_ai_rewritten = true;
                bullet.injected_keywords = if target_keyword.is_empty() {
                    Vec::new()
                } else {
                    vec![target_keyword.clone()]
                };
                resume.apply_word_counts();
                store::save_document(&state.db, resume_id, &resume).await?;
            }
        }
    }

    Ok(Json(RewriteResponse {
        original: bullet_point.to_string(),
        rewritten: rewritten.text,
        injected_keyword: target_keyword,
        word_count: rewritten.word_count,
    }))
}

/// POST /api/v1/ai/bullet-decision
///
/// Accepts or rejects a pending rewrite. Rejection clears the rewrite so
/// the bullet falls back to its original text everywhere.
pub async fn handle_bullet_decision(
    State(state): State<AppState>,
    Json(request): Json<BulletDecisionRequest>,
) -> Result<Json<BulletDecisionResponse>, AppError> {
    let row = store::fetch_resume(&state.db, request.resume_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Resume {} not found", request.resume_id))
        })?;
    let mut resume = row.document()?;

    let bullet = bullet_at_mut(&mut resume, request.experience_index, request.bullet_index)
        .ok_or_else(|| AppError::NotFound("Bullet not found".to_string()))?;

    bullet.accepted = request.accept;
    if !request.accept {
        bullet.rewritten = None;
        bullet.is_ai_rewritten = false;
        bullet.injected_keywords.clear();
    }

    resume.apply_word_counts();
    store::save_document(&state.db, request.resume_id, &resume).await?;

    Ok(Json(BulletDecisionResponse {
        accepted: request.accept,
    }))
}

/// POST /api/v1/ai/summary
///
/// Generates a professional summary. Target keywords default to the top
/// stored extraction (3 technical + 2 tools). With a resumeId, the summary
/// is persisted onto the résumé.
pub async fn handle_summary(
    State(state): State<AppState>,
    Json(request): Json<SummaryRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    let mut keywords = request.target_keywords.unwrap_or_default();

    let (resume, persist_id) = if let Some(resume_id) = request.resume_id {
        let row = store::fetch_resume(&state.db, resume_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
        (row.document()?, Some(resume_id))
    } else {
        let resume = request.resume_data.ok_or_else(|| {
            AppError::Validation("Provide resumeId or resumeData".to_string())
        })?;
        (resume, None)
    };

    if keywords.is_empty() {
        if let Some(ats) = resume.ats_data.as_ref() {
            keywords = ats
                .extracted_keywords
                .technical
                .iter()
                .take(3)
                .chain(ats.extracted_keywords.tools.iter().take(2))
                .cloned()
                .collect();
        }
    }

    let summary = generate_summary(&resume, &keywords, &state.llm).await?;

    if let Some(resume_id) = persist_id {
        let mut resume = resume;
        resume.personal_info.summary = Some(summary.clone());
        store::save_document(&state.db, resume_id, &resume).await?;
    }

    Ok(Json(SummaryResponse { summary }))
}

/// POST /api/v1/ai/optimize
///
/// The one-click workflow: analyze the JD, score, rewrite bullets around
/// missing keywords, re-score, persist. See `ai::optimize`.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizeOutcome>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Please provide resumeId and job description".to_string(),
        ));
    }

    let row = store::fetch_resume(&state.db, request.resume_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Resume {} not found", request.resume_id))
        })?;
    let mut resume = row.document()?;

    let outcome = optimize_resume(
        &mut resume,
        &request.jd_text,
        &state.llm,
        state.scorer.as_ref(),
    )
    .await?;

    resume.apply_word_counts();
    store::save_document_with_status(&state.db, request.resume_id, &resume, STATUS_OPTIMIZING)
        .await?;

    Ok(Json(outcome))
}

fn bullet_at_mut(
    resume: &mut Resume,
    experience_index: usize,
    bullet_index: usize,
) -> Option<&mut BulletPoint> {
    resume
        .experience
        .get_mut(experience_index)
        .and_then(|experience| experience.bullets.get_mut(bullet_index))
}
