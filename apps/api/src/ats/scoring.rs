//! ATS scoring — weighted keyword-coverage scoring of résumé text.
//!
//! Default: `KeywordAtsScorer` (pure-Rust, fast, deterministic, fully
//! testable). `AppState` holds an `Arc<dyn AtsScorer>`, so a semantic
//! backend could be swapped in without touching handlers.

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::ats::keywords::{KeywordCategory, KeywordSet};

/// Upper bound on the combined suggestion list.
const MAX_SUGGESTIONS: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Per-category outcome, before display rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    /// Coverage in [0, 100], unrounded. The weighted sum is computed from
    /// this value; rounding first would compound the error.
    pub score: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Rounded per-category scores, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub technical: u32,
    pub tools: u32,
    pub soft: u32,
    pub methodologies: u32,
}

/// Full scoring result. Matched/missing lists are flattened in category
/// order (technical, tools, soft, methodologies), preserving each
/// category's input keyword order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub ats_score: u32,
    pub breakdown: ScoreBreakdown,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The ATS scorer seam. Implement this to swap backends without touching
/// the endpoint, handler, or caller code.
///
/// Carried in `AppState` as `Arc<dyn AtsScorer>`.
pub trait AtsScorer: Send + Sync {
    fn score(&self, resume_text: &str, keywords: &KeywordSet) -> ScoreResult;
}

/// Default keyword-coverage scorer. Pure, synchronous, no I/O.
pub struct KeywordAtsScorer;

impl AtsScorer for KeywordAtsScorer {
    fn score(&self, resume_text: &str, keywords: &KeywordSet) -> ScoreResult {
        compute_ats_score(resume_text, keywords)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core scoring algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Scores `resume_text` against a categorized keyword set.
///
/// Per category: coverage = matched / total × 100, with an empty category
/// scoring a vacuous 100. Overall = round(Σ category × weight) over the
/// unrounded category scores. All rounding is round-half-away-from-zero
/// (`f64::round`), so e.g. 47.5 rounds to 48.
pub fn compute_ats_score(resume_text: &str, keywords: &KeywordSet) -> ScoreResult {
    let technical = score_category(resume_text, keywords.get(KeywordCategory::Technical));
    let tools = score_category(resume_text, keywords.get(KeywordCategory::Tools));
    let soft = score_category(resume_text, keywords.get(KeywordCategory::Soft));
    let methodologies = score_category(resume_text, keywords.get(KeywordCategory::Methodologies));

    let overall = technical.score * KeywordCategory::Technical.weight()
        + tools.score * KeywordCategory::Tools.weight()
        + soft.score * KeywordCategory::Soft.weight()
        + methodologies.score * KeywordCategory::Methodologies.weight();

    let suggestions = build_suggestions(&technical.missing, &tools.missing, &methodologies.missing);

    let categories = [&technical, &tools, &soft, &methodologies];
    let matched_keywords: Vec<String> = categories
        .iter()
        .flat_map(|c| c.matched.iter().cloned())
        .collect();
    let missing_keywords: Vec<String> = categories
        .iter()
        .flat_map(|c| c.missing.iter().cloned())
        .collect();

    ScoreResult {
        ats_score: round_score(overall),
        breakdown: ScoreBreakdown {
            technical: round_score(technical.score),
            tools: round_score(tools.score),
            soft: round_score(soft.score),
            methodologies: round_score(methodologies.score),
        },
        matched_keywords,
        missing_keywords,
        suggestions,
    }
}

/// Round-half-away-from-zero, the one rounding rule used for every
/// displayed score.
fn round_score(score: f64) -> u32 {
    score.round() as u32
}

fn score_category(resume_text: &str, keywords: &[String]) -> CategoryScore {
    if keywords.is_empty() {
        // Vacuous match: nothing asked for, nothing can be missing.
        return CategoryScore {
            score: 100.0,
            matched: Vec::new(),
            missing: Vec::new(),
        };
    }

    let mut matched = Vec::new();
    let mut missing = Vec::new();

    for keyword in keywords {
        if contains_keyword(resume_text, keyword) {
            matched.push(keyword.clone());
        } else {
            missing.push(keyword.clone());
        }
    }

    let score = matched.len() as f64 / keywords.len() as f64 * 100.0;
    CategoryScore {
        score,
        matched,
        missing,
    }
}

/// Case-insensitive literal containment. The keyword is escaped before the
/// pattern is built, so `C++` or `Node.js` match as plain substrings.
fn contains_keyword(resume_text: &str, keyword: &str) -> bool {
    RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build()
        .map(|re| re.is_match(resume_text))
        .unwrap_or(false)
}

/// Builds the improvement suggestions from missing keywords: the first 3
/// technical, first 2 tools, first 2 methodologies, appended in that order
/// and hard-capped at `MAX_SUGGESTIONS`. Soft skills are excluded — adding
/// "communication" to a skills list rarely moves an ATS filter.
fn build_suggestions(
    technical_missing: &[String],
    tools_missing: &[String],
    methodologies_missing: &[String],
) -> Vec<String> {
    technical_missing
        .iter()
        .take(3)
        .map(|k| format!("Add experience with \"{k}\" to boost technical match"))
        .chain(
            tools_missing
                .iter()
                .take(2)
                .map(|k| format!("Include \"{k}\" tool proficiency")),
        )
        .chain(
            methodologies_missing
                .iter()
                .take(2)
                .map(|k| format!("Mention experience with \"{k}\" methodology")),
        )
        .take(MAX_SUGGESTIONS)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(
        technical: &[&str],
        tools: &[&str],
        soft: &[&str],
        methodologies: &[&str],
    ) -> KeywordSet {
        let owned = |s: &[&str]| s.iter().map(|k| k.to_string()).collect();
        KeywordSet {
            technical: owned(technical),
            tools: owned(tools),
            soft: owned(soft),
            methodologies: owned(methodologies),
        }
    }

    #[test]
    fn test_empty_keyword_set_scores_100_everywhere() {
        let result = compute_ats_score("any resume text at all", &KeywordSet::default());
        assert_eq!(result.ats_score, 100);
        assert_eq!(result.breakdown.technical, 100);
        assert_eq!(result.breakdown.tools, 100);
        assert_eq!(result.breakdown.soft, 100);
        assert_eq!(result.breakdown.methodologies, 100);
        assert!(result.matched_keywords.is_empty());
        assert!(result.missing_keywords.is_empty());
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_all_keywords_present_scores_100() {
        let set = keywords(&["rust", "tokio"], &["docker"], &["leadership"], &["agile"]);
        let text = "built services in rust with tokio, shipped via docker, \
                    agile team leadership";
        let result = compute_ats_score(text, &set);
        assert_eq!(result.ats_score, 100);
        assert_eq!(result.matched_keywords.len(), 5);
        assert!(result.missing_keywords.is_empty());
    }

    #[test]
    fn test_no_keywords_present_scores_0() {
        let set = keywords(&["rust"], &["docker"], &["leadership"], &["agile"]);
        let result = compute_ats_score("wrote cobol on a mainframe", &set);
        assert_eq!(result.ats_score, 0);
        assert_eq!(result.breakdown.technical, 0);
        assert!(result.matched_keywords.is_empty());
        assert_eq!(result.missing_keywords.len(), 4);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let set = keywords(&["react"], &[], &[], &[]);
        let result = compute_ats_score("Led development using React", &set);
        assert_eq!(result.matched_keywords, vec!["react"]);
        assert_eq!(result.breakdown.technical, 100);
    }

    #[test]
    fn test_matching_is_literal_not_pattern() {
        // `+` must be treated as a literal character, not a quantifier.
        let set = keywords(&["C++"], &[], &[], &[]);
        let matched = compute_ats_score("systems programming in c++ and rust", &set);
        assert_eq!(matched.matched_keywords, vec!["C++"]);

        // `.` must not act as a wildcard: "node js" is not "node.js".
        let set = keywords(&["Node.js"], &[], &[], &[]);
        let missed = compute_ats_score("built apis with node js", &set);
        assert_eq!(missed.missing_keywords, vec!["Node.js"]);
    }

    #[test]
    fn test_matched_plus_missing_partitions_input() {
        let set = keywords(
            &["rust", "go", "python"],
            &["docker", "k8s"],
            &["communication"],
            &["agile", "scrum"],
        );
        let result = compute_ats_score("rust and docker and scrum", &set);
        assert_eq!(
            result.matched_keywords.len() + result.missing_keywords.len(),
            set.total()
        );
    }

    #[test]
    fn test_keyword_order_is_preserved() {
        let set = keywords(&["python", "rust", "go"], &[], &[], &[]);
        let result = compute_ats_score("go and python, no crab", &set);
        assert_eq!(result.matched_keywords, vec!["python", "go"]);
        assert_eq!(result.missing_keywords, vec!["rust"]);
    }

    #[test]
    fn test_flattened_lists_follow_category_order() {
        let set = keywords(&["rust"], &["docker"], &["mentoring"], &["kanban"]);
        let result = compute_ats_score("rust docker mentoring kanban", &set);
        assert_eq!(
            result.matched_keywords,
            vec!["rust", "docker", "mentoring", "kanban"]
        );
    }

    #[test]
    fn test_weighted_scenario_rounds_half_away_from_zero() {
        // technical 1/2, tools 1/2, soft 1/1, methodologies 0/1:
        // 50*0.40 + 50*0.25 + 100*0.15 + 0*0.20 = 47.5 → 48
        let set = keywords(
            &["Node.js", "Python"],
            &["SQL", "Jira"],
            &["Communication"],
            &["Agile"],
        );
        let text = "developed apis using node.js and sql. led a team with strong communication.";
        let result = compute_ats_score(text, &set);
        assert_eq!(result.breakdown.technical, 50);
        assert_eq!(result.breakdown.tools, 50);
        assert_eq!(result.breakdown.soft, 100);
        assert_eq!(result.breakdown.methodologies, 0);
        assert_eq!(result.ats_score, 48);
        assert_eq!(result.matched_keywords, vec!["Node.js", "SQL", "Communication"]);
        assert_eq!(result.missing_keywords, vec!["Python", "Jira", "Agile"]);
    }

    #[test]
    fn test_display_rounding_is_independent_of_overall() {
        // technical 1/8 = 12.5 rounds to 13 for display, but the weighted
        // sum uses the unrounded 12.5: 12.5*0.40 + 100*0.60 = 65.
        let set = keywords(
            &["a1", "a2", "a3", "a4", "a5", "a6", "a7", "a8"],
            &[],
            &[],
            &[],
        );
        let result = compute_ats_score("only a1 appears", &set);
        assert_eq!(result.breakdown.technical, 13);
        assert_eq!(result.ats_score, 65);
    }

    #[test]
    fn test_suggestions_capped_at_five_in_category_order() {
        let set = keywords(
            &["Python", "Go", "Rust", "Kotlin"],
            &["Jira", "Docker", "Slack"],
            &[],
            &["Agile"],
        );
        let result = compute_ats_score("nothing relevant here", &set);
        assert_eq!(
            result.suggestions,
            vec![
                "Add experience with \"Python\" to boost technical match",
                "Add experience with \"Go\" to boost technical match",
                "Add experience with \"Rust\" to boost technical match",
                "Include \"Jira\" tool proficiency",
                "Include \"Docker\" tool proficiency",
            ]
        );
    }

    #[test]
    fn test_methodology_suggestions_fill_remaining_slots() {
        let set = keywords(&["Python"], &["Jira"], &["Empathy"], &["Agile", "Scrum"]);
        let result = compute_ats_score("none of these", &set);
        assert_eq!(
            result.suggestions,
            vec![
                "Add experience with \"Python\" to boost technical match",
                "Include \"Jira\" tool proficiency",
                "Mention experience with \"Agile\" methodology",
                "Mention experience with \"Scrum\" methodology",
            ]
        );
    }

    #[test]
    fn test_soft_skills_never_suggested() {
        let set = keywords(&[], &[], &["Communication", "Teamwork"], &[]);
        let result = compute_ats_score("", &set);
        assert!(result.suggestions.is_empty());
        assert_eq!(result.missing_keywords.len(), 2);
    }

    #[test]
    fn test_empty_resume_text_misses_everything() {
        let set = keywords(&["rust"], &[], &[], &[]);
        let result = compute_ats_score("", &set);
        assert_eq!(result.breakdown.technical, 0);
        // The other three categories are vacuously 100.
        assert_eq!(result.ats_score, 60);
    }

    #[test]
    fn test_scorer_is_deterministic() {
        let set = keywords(&["rust", "go"], &["docker"], &["grit"], &["agile"]);
        let text = "rust and docker in an agile shop";
        let first = compute_ats_score(text, &set);
        let second = compute_ats_score(text, &set);
        assert_eq!(first, second);
    }

    #[test]
    fn test_trait_object_dispatches_to_keyword_scorer() {
        let scorer: &dyn AtsScorer = &KeywordAtsScorer;
        let set = keywords(&["rust"], &[], &[], &[]);
        let result = scorer.score("rust all the way down", &set);
        assert_eq!(result.ats_score, 100);
    }

    #[test]
    fn test_score_result_serializes_with_contract_field_names() {
        let result = compute_ats_score("", &keywords(&["rust"], &[], &[], &[]));
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("atsScore").is_some());
        assert!(json.get("matchedKeywords").is_some());
        assert!(json.get("missingKeywords").is_some());
        assert!(json.get("breakdown").and_then(|b| b.get("technical")).is_some());
        assert!(json.get("suggestions").is_some());
    }
}
