//! One-click optimization: analyze a JD, score the résumé, rewrite the
//! weakest bullets around the missing keywords, and re-score.

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::ai::jd_analysis::{analyze_jd, JdAnalysis};
use crate::ai::rewrite::rewrite_bullet;
use crate::ats::resume_text::{build_resume_text, BulletTextMode};
use crate::ats::scoring::AtsScorer;
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::resume::{AtsData, Resume};

/// How much of the résumé a single optimize pass touches. Each rewrite is
/// an LLM round-trip, so the pass is bounded to keep latency sane.
const MAX_EXPERIENCES: usize = 3;
const MAX_BULLETS_PER_EXPERIENCE: usize = 2;
const MAX_INJECTED_KEYWORDS: usize = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedBullet {
    pub experience_index: usize,
    pub bullet_index: usize,
    pub original: String,
    pub rewritten: String,
    pub injected_keyword: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeOutcome {
    pub initial_score: u32,
    pub new_score: u32,
    pub improvement: i32,
    pub optimized_bullets: Vec<OptimizedBullet>,
    pub keywords: JdAnalysis,
    pub message: String,
}

/// Runs the full optimization workflow over `resume`, mutating it in
/// place. The caller persists the document afterwards.
///
/// The new score is a projection: it reads pending rewrites as if they
/// were accepted, since acceptance is the user's call and happens later.
/// Both scores come from the same weighted scorer, so `previousScore` and
/// `atsScore` stay mutually comparable.
pub async fn optimize_resume(
    resume: &mut Resume,
    jd_text: &str,
    llm: &LlmClient,
    scorer: &dyn AtsScorer,
) -> Result<OptimizeOutcome, AppError> {
    // Step 1: analyze the JD
    let analysis = analyze_jd(jd_text, llm).await?;
    let keyword_set = analysis.to_keyword_set();

    // Step 2: initial score over the résumé as it stands
    let initial = scorer.score(
        &build_resume_text(resume, BulletTextMode::AcceptedOnly),
        &keyword_set,
    );

    // Step 3: rewrite bullets, injecting the top missing keywords round-robin
    let inject: Vec<String> = initial
        .missing_keywords
        .iter()
        .take(MAX_INJECTED_KEYWORDS)
        .cloned()
        .collect();

    let mut optimized_bullets = Vec::new();
    if !inject.is_empty() {
        let experience_count = resume.experience.len().min(MAX_EXPERIENCES);
        for experience_index in 0..experience_count {
            let experience = &resume.experience[experience_index];
            let context = rewrite_context(
                experience.role.as_deref(),
                experience.company.as_deref(),
            );
            let bullet_count = experience.bullets.len().min(MAX_BULLETS_PER_EXPERIENCE);

            for bullet_index in 0..bullet_count {
                let Some(original) = resume.experience[experience_index].bullets[bullet_index]
                    .original
                    .clone()
                    .filter(|o| !o.trim().is_empty())
                else {
                    continue;
                };
                let keyword = inject[optimized_bullets.len() % inject.len()].clone();

                match rewrite_bullet(&original, &keyword, context.as_deref(), llm).await {
                    Ok(rewritten) => {
                        let bullet =
                            &mut resume.experience[experience_index].bullets[bullet_index];
                        bullet.rewritten = Some(rewritten.text.clone());
                        bullet.is_ai_rewritten = true;
                        bullet.injected_keywords = vec![keyword.clone()];

                        optimized_bullets.push(OptimizedBullet {
                            experience_index,
                            bullet_index,
                            original,
                            rewritten: rewritten.text,
                            injected_keyword: keyword,
                        });
                    }
                    // A failed rewrite costs one bullet, not the whole pass.
                    Err(e) => warn!(
                        "bullet rewrite failed (experience {experience_index}, bullet {bullet_index}): {e}"
                    ),
                }
            }
        }
    }

    // Step 4: projected score with the pending rewrites in place
    let projected = scorer.score(
        &build_resume_text(resume, BulletTextMode::PreferRewritten),
        &keyword_set,
    );

    info!(
        "optimize pass rewrote {} bullets: {} -> {}",
        optimized_bullets.len(),
        initial.ats_score,
        projected.ats_score
    );

    // Step 5: stamp the ATS data onto the document; the caller persists
    resume.ats_data = Some(AtsData {
        target_jd: Some(jd_text.to_string()),
        extracted_keywords: keyword_set,
        ats_score: projected.ats_score,
        previous_score: Some(initial.ats_score),
        matched_keywords: projected.matched_keywords.clone(),
        missing_keywords: projected.missing_keywords.clone(),
        suggestions: projected.suggestions.clone(),
        last_analyzed: Some(Utc::now()),
    });

    let message = format!(
        "ATS score improved from {}% to {}%",
        initial.ats_score, projected.ats_score
    );

    Ok(OptimizeOutcome {
        initial_score: initial.ats_score,
        new_score: projected.ats_score,
        improvement: projected.ats_score as i32 - initial.ats_score as i32,
        optimized_bullets,
        keywords: analysis,
        message,
    })
}

fn rewrite_context(role: Option<&str>, company: Option<&str>) -> Option<String> {
    match (role.filter(|r| !r.is_empty()), company.filter(|c| !c.is_empty())) {
        (None, None) => None,
        (role, company) => Some(format!(
            "{} at {}",
            role.unwrap_or("Professional"),
            company.unwrap_or("the company")
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_context_with_both_parts() {
        assert_eq!(
            rewrite_context(Some("Engineer"), Some("Acme")).as_deref(),
            Some("Engineer at Acme")
        );
    }

    #[test]
    fn test_rewrite_context_fills_missing_half() {
        assert_eq!(
            rewrite_context(Some("Engineer"), None).as_deref(),
            Some("Engineer at the company")
        );
        assert_eq!(
            rewrite_context(None, Some("Acme")).as_deref(),
            Some("Professional at Acme")
        );
    }

    #[test]
    fn test_rewrite_context_absent_when_empty() {
        assert_eq!(rewrite_context(None, None), None);
        assert_eq!(rewrite_context(Some(""), Some("")), None);
    }
}
