//! Job-description analysis — extracts ranked, categorized keywords via the LLM.

use serde::{Deserialize, Serialize};

use crate::ai::prompts::{ANALYZE_JD_PROMPT_TEMPLATE, ANALYZE_JD_SYSTEM};
use crate::ats::keywords::KeywordSet;
use crate::errors::AppError;
use crate::llm_client::LlmClient;

/// Categorized keywords extracted from a job description, ranked
/// most-important-first within each category by the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JdAnalysis {
    pub technical_skills: Vec<String>,
    pub tools: Vec<String>,
    pub soft_skills: Vec<String>,
    pub methodologies: Vec<String>,
    pub seniority_level: Option<String>,
    pub role_type: Option<String>,
}

impl JdAnalysis {
    pub fn total_keywords(&self) -> usize {
        self.technical_skills.len()
            + self.tools.len()
            + self.soft_skills.len()
            + self.methodologies.len()
    }

    /// Maps the extractor's field names onto the scorer's categories.
    pub fn to_keyword_set(&self) -> KeywordSet {
        KeywordSet {
            technical: self.technical_skills.clone(),
            tools: self.tools.clone(),
            soft: self.soft_skills.clone(),
            methodologies: self.methodologies.clone(),
        }
    }
}

/// Analyzes a raw job description and returns its keyword inventory.
pub async fn analyze_jd(jd_text: &str, llm: &LlmClient) -> Result<JdAnalysis, AppError> {
    let prompt = ANALYZE_JD_PROMPT_TEMPLATE.replace("{jd_text}", jd_text);
    llm.call_json::<JdAnalysis>(&prompt, ANALYZE_JD_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("JD analysis failed: {e}")))
}
