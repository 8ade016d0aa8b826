//! Professional summary generation.

use crate::ai::prompts::{RESUME_WRITER_SYSTEM, SUMMARY_PROMPT_TEMPLATE};
use crate::ai::rewrite::strip_surrounding_quotes;
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::resume::Resume;

/// Generates a 2-3 sentence summary for a candidate, weaving in the given
/// target keywords. Candidate facts come from the most recent experience
/// entry and the technical skill list.
pub async fn generate_summary(
    resume: &Resume,
    target_keywords: &[String],
    llm: &LlmClient,
) -> Result<String, AppError> {
    let latest = resume.experience.first();
    let role = latest
        .and_then(|e| e.role.as_deref())
        .filter(|r| !r.is_empty())
        .unwrap_or("Professional");
    let company = latest
        .and_then(|e| e.company.as_deref())
        .filter(|c| !c.is_empty())
        .unwrap_or("Technology");

    let skills: Vec<&str> = resume
        .skills
        .technical
        .iter()
        .take(5)
        .map(String::as_str)
        .collect();
    let skills = if skills.is_empty() {
        "Various".to_string()
    } else {
        skills.join(", ")
    };

    let prompt = SUMMARY_PROMPT_TEMPLATE
        .replace("{keywords}", &target_keywords.join(", "))
        .replace("{role}", role)
        .replace("{company}", company)
        .replace("{skills}", &skills)
        .replace("{role_count}", &resume.experience.len().max(1).to_string());

    let text = llm
        .call_text(&prompt, RESUME_WRITER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("summary generation failed: {e}")))?;

    Ok(strip_surrounding_quotes(text.trim()).trim().to_string())
}

#[cfg(test)]
mod tests {
    use crate::ai::prompts::SUMMARY_PROMPT_TEMPLATE;

    #[test]
    fn test_template_placeholders_are_substitutable() {
        let prompt = SUMMARY_PROMPT_TEMPLATE
            .replace("{keywords}", "Rust, Kafka")
            .replace("{role}", "Platform Engineer")
            .replace("{company}", "Acme")
            .replace("{skills}", "Rust, Go")
            .replace("{role_count}", "3");
        assert!(prompt.contains("Platform Engineer"));
        assert!(prompt.contains("Rust, Kafka"));
        assert!(!prompt.contains('{'));
    }
}
