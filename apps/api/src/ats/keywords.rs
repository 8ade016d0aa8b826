//! Categorized target keywords for ATS scoring.

use serde::{Deserialize, Serialize};

/// The four fixed keyword categories. Each carries a fixed share of the
/// overall ATS score; the weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordCategory {
    Technical,
    Tools,
    Soft,
    Methodologies,
}

impl KeywordCategory {
    pub const ALL: [KeywordCategory; 4] = [
        KeywordCategory::Technical,
        KeywordCategory::Tools,
        KeywordCategory::Soft,
        KeywordCategory::Methodologies,
    ];

    pub fn weight(self) -> f64 {
        match self {
            KeywordCategory::Technical => 0.40,
            KeywordCategory::Tools => 0.25,
            KeywordCategory::Soft => 0.15,
            KeywordCategory::Methodologies => 0.20,
        }
    }
}

/// Keywords to match against a résumé, ranked most-important-first within
/// each category by the upstream extractor. Any category may be absent;
/// the extractor's `technicalSkills`/`softSkills` field names are accepted
/// as aliases so callers never have to rename by hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordSet {
    #[serde(alias = "technicalSkills")]
    pub technical: Vec<String>,
    pub tools: Vec<String>,
    #[serde(alias = "softSkills")]
    pub soft: Vec<String>,
    pub methodologies: Vec<String>,
}

impl KeywordSet {
    pub fn get(&self, category: KeywordCategory) -> &[String] {
        match category {
            KeywordCategory::Technical => &self.technical,
            KeywordCategory::Tools => &self.tools,
            KeywordCategory::Soft => &self.soft,
            KeywordCategory::Methodologies => &self.methodologies,
        }
    }

    pub fn total(&self) -> usize {
        KeywordCategory::ALL
            .iter()
            .map(|c| self.get(*c).len())
            .sum()
    }
}
