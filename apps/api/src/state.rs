use std::sync::Arc;

use sqlx::PgPool;

use crate::ats::scoring::AtsScorer;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    /// Pluggable ATS scorer. Default: `KeywordAtsScorer`.
    pub scorer: Arc<dyn AtsScorer>,
}
