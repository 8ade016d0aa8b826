//! Bullet rewriting — injects a target keyword into an achievement line.

use crate::ai::prompts::{RESUME_WRITER_SYSTEM, REWRITE_BULLET_PROMPT_TEMPLATE};
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::resume::count_words;

/// Rewrites longer than this are cut back to `TRUNCATE_TO_WORDS`. The
/// prompt asks for 25 words; the clamp only fires when the model overruns.
const MAX_BULLET_WORDS: usize = 30;
const TRUNCATE_TO_WORDS: usize = 25;

#[derive(Debug, Clone, PartialEq)]
pub struct RewrittenBullet {
    pub text: String,
    pub word_count: u32,
}

/// Asks the LLM to rewrite `bullet` around `keyword`, then normalizes the
/// output (quote stripping, word budget).
pub async fn rewrite_bullet(
    bullet: &str,
    keyword: &str,
    context: Option<&str>,
    llm: &LlmClient,
) -> Result<RewrittenBullet, AppError> {
    let context_line = context
        .map(|c| format!("Context (role/company): {c}"))
        .unwrap_or_default();
    let prompt = REWRITE_BULLET_PROMPT_TEMPLATE
        .replace("{bullet_point}", bullet)
        .replace("{keyword}", keyword)
        .replace("{context_line}", &context_line);

    let text = llm
        .call_text(&prompt, RESUME_WRITER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("bullet rewrite failed: {e}")))?;

    Ok(clean_rewritten(&text))
}

/// Strips one pair of surrounding quotes and enforces the word budget.
pub fn clean_rewritten(text: &str) -> RewrittenBullet {
    let text = strip_surrounding_quotes(text.trim()).trim();

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > MAX_BULLET_WORDS {
        let truncated = words[..TRUNCATE_TO_WORDS].join(" ");
        RewrittenBullet {
            word_count: count_words(&truncated),
            text: truncated,
        }
    } else {
        RewrittenBullet {
            text: text.to_string(),
            word_count: words.len() as u32,
        }
    }
}

/// Removes a single leading and trailing quote character, if present.
/// Models occasionally echo the bullet back wrapped in quotes.
pub(crate) fn strip_surrounding_quotes(text: &str) -> &str {
    let text = text
        .strip_prefix('"')
        .or_else(|| text.strip_prefix('\''))
        .unwrap_or(text);
    text.strip_suffix('"')
        .or_else(|| text.strip_suffix('\''))
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_double_quotes() {
        let cleaned = clean_rewritten("\"Led migration to Kubernetes\"");
        assert_eq!(cleaned.text, "Led migration to Kubernetes");
        assert_eq!(cleaned.word_count, 4);
    }

    #[test]
    fn test_strips_single_quotes() {
        assert_eq!(
            clean_rewritten("'Shipped the feature'").text,
            "Shipped the feature"
        );
    }

    #[test]
    fn test_strips_only_one_quote_pair() {
        // An inner quoted phrase must survive.
        assert_eq!(
            strip_surrounding_quotes("\"Built \"zero-downtime\" deploys\""),
            "Built \"zero-downtime\" deploys"
        );
    }

    #[test]
    fn test_short_text_passes_through() {
        let cleaned = clean_rewritten("Implemented CI pipeline with GitHub Actions");
        assert_eq!(cleaned.text, "Implemented CI pipeline with GitHub Actions");
        assert_eq!(cleaned.word_count, 6);
    }

    #[test]
    fn test_overrun_is_truncated_to_25_words() {
        let long: String = (1..=40)
            .map(|i| format!("word{i}"))
            .collect::<Vec<_>>()
            .join(" ");
        let cleaned = clean_rewritten(&long);
        assert_eq!(cleaned.word_count, 25);
        assert!(cleaned.text.starts_with("word1 "));
        assert!(cleaned.text.ends_with(" word25"));
    }

    #[test]
    fn test_exactly_thirty_words_is_untouched() {
        let text: String = (1..=30)
            .map(|i| format!("w{i}"))
            .collect::<Vec<_>>()
            .join(" ");
        let cleaned = clean_rewritten(&text);
        assert_eq!(cleaned.word_count, 30);
        assert_eq!(cleaned.text, text);
    }

    #[test]
    fn test_whitespace_is_normalized_around_quotes() {
        let cleaned = clean_rewritten("  \" Led the team \"  ");
        assert_eq!(cleaned.text, "Led the team");
    }
}
