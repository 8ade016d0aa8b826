//! Résumé document model.
//!
//! A résumé is stored whole as a JSONB document; the row carries only
//! identity, status, and timestamps. Every document field is optional or
//! defaulted so partially-filled résumés from the editor round-trip
//! without ceremony. Wire names are camelCase — the document is shared
//! with a JavaScript client.

use std::sync::OnceLock;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::ats::keywords::KeywordSet;

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_OPTIMIZING: &str = "optimizing";

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Document types
// ────────────────────────────────────────────────────────────────────────────

/// A single achievement line. Bullets are objects rather than strings so
/// each one can carry an AI rewrite through the accept/reject workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BulletPoint {
    pub id: String,
    pub original: Option<String>,
    pub rewritten: Option<String>,
    #[serde(rename = "isAIRewritten")]
    pub is_ai_rewritten: bool,
    pub accepted: bool,
    pub injected_keywords: Vec<String>,
    pub word_count: Option<u32>,
}

impl Default for BulletPoint {
    fn default() -> Self {
        Self {
            id: new_id(),
            original: None,
            rewritten: None,
            is_ai_rewritten: false,
            accepted: false,
            injected_keywords: Vec::new(),
            word_count: None,
        }
    }
}

impl BulletPoint {
    /// The text a reader currently sees: the rewrite once accepted, else
    /// the original.
    fn displayed_text(&self) -> Option<&str> {
        self.rewritten.as_deref().or(self.original.as_deref())
    }

    fn apply_word_count(&mut self) {
        self.word_count = self.displayed_text().map(count_words);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: String,
    pub school: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
    pub highlights: Vec<BulletPoint>,
}

impl Default for Education {
    fn default() -> Self {
        Self {
            id: new_id(),
            school: None,
            degree: None,
            field_of_study: None,
            start_date: None,
            end_date: None,
            gpa: None,
            highlights: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: String,
    pub company: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: bool,
    pub bullets: Vec<BulletPoint>,
}

impl Default for Experience {
    fn default() -> Self {
        Self {
            id: new_id(),
            company: None,
            role: None,
            location: None,
            start_date: None,
            end_date: None,
            current: false,
            bullets: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub title: Option<String>,
    pub link: Option<String>,
    pub technologies: Vec<String>,
    pub bullets: Vec<BulletPoint>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            id: new_id(),
            title: None,
            link: None,
            technologies: Vec::new(),
            bullets: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skills {
    pub technical: Vec<String>,
    pub tools: Vec<String>,
    pub soft: Vec<String>,
    pub languages: Vec<String>,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub summary: Option<String>,
}

/// ATS optimization state attached to a résumé by the AI endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AtsData {
    #[serde(rename = "targetJD")]
    pub target_jd: Option<String>,
    pub extracted_keywords: KeywordSet,
    pub ats_score: u32,
    pub previous_score: Option<u32>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
    pub last_analyzed: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resume {
    pub personal_info: PersonalInfo,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub skills: Skills,
    pub ats_data: Option<AtsData>,
    pub template_id: String,
}

impl Default for Resume {
    fn default() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            education: Vec::new(),
            experience: Vec::new(),
            projects: Vec::new(),
            skills: Skills::default(),
            ats_data: None,
            template_id: "professional".to_string(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Derived fields and validation
// ────────────────────────────────────────────────────────────────────────────

pub fn count_words(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

impl Resume {
    /// Recomputes every bullet's word count from its displayed text.
    /// Runs before each persist; word counts are the document's only
    /// derived field.
    pub fn apply_word_counts(&mut self) {
        for experience in &mut self.experience {
            for bullet in &mut experience.bullets {
                bullet.apply_word_count();
            }
        }
        for project in &mut self.projects {
            for bullet in &mut project.bullets {
                bullet.apply_word_count();
            }
        }
    }

    /// Field constraints enforced on create. Merge updates skip this so a
    /// partial save from the live editor never bounces on an untouched
    /// section.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let info = &self.personal_info;
        check_len("personalInfo.fullName", info.full_name.as_deref(), 100)?;
        check_len("personalInfo.summary", info.summary.as_deref(), 500)?;
        if let Some(email) = info.email.as_deref() {
            if !email.is_empty() && !email_regex().is_match(email) {
                return Err("Please use a valid email address".to_string());
            }
        }

        check_count("education", self.education.len(), 5)?;
        for education in &self.education {
            check_len("education.school", education.school.as_deref(), 100)?;
            check_len("education.degree", education.degree.as_deref(), 100)?;
            check_len(
                "education.fieldOfStudy",
                education.field_of_study.as_deref(),
                100,
            )?;
        }

        check_count("experience", self.experience.len(), 10)?;
        for experience in &self.experience {
            check_len("experience.company", experience.company.as_deref(), 100)?;
            check_len("experience.role", experience.role.as_deref(), 100)?;
            check_count("experience.bullets", experience.bullets.len(), 8)?;
            check_bullets(&experience.bullets)?;
        }

        check_count("projects", self.projects.len(), 8)?;
        for project in &self.projects {
            check_len("projects.title", project.title.as_deref(), 100)?;
            check_count("projects.bullets", project.bullets.len(), 5)?;
            check_bullets(&project.bullets)?;
        }

        check_count("skills.technical", self.skills.technical.len(), 20)?;
        check_count("skills.tools", self.skills.tools.len(), 15)?;
        check_count("skills.soft", self.skills.soft.len(), 10)?;

        Ok(())
    }
}

fn check_bullets(bullets: &[BulletPoint]) -> std::result::Result<(), String> {
    for bullet in bullets {
        check_len("bullet.original", bullet.original.as_deref(), 500)?;
        check_len("bullet.rewritten", bullet.rewritten.as_deref(), 500)?;
    }
    Ok(())
}

fn check_len(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> std::result::Result<(), String> {
    match value {
        Some(v) if v.chars().count() > max => {
            Err(format!("{field} cannot exceed {max} characters"))
        }
        _ => Ok(()),
    }
}

fn check_count(field: &str, count: usize, max: usize) -> std::result::Result<(), String> {
    if count > max {
        Err(format!("Maximum {max} {field} entries"))
    } else {
        Ok(())
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"))
}

// ────────────────────────────────────────────────────────────────────────────
// Storage row
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub data: Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stored résumé with its document parsed, as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub resume: Resume,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeRow {
    pub fn document(&self) -> Result<Resume> {
        serde_json::from_value(self.data.clone())
            .with_context(|| format!("resume {} holds an invalid document", self.id))
    }

    pub fn into_record(self) -> Result<ResumeRecord> {
        let resume = serde_json::from_value(self.data)
            .with_context(|| format!("resume {} holds an invalid document", self.id))?;
        Ok(ResumeRecord {
            id: self.id,
            resume,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_deserializes_to_default_resume() {
        let resume: Resume = serde_json::from_str("{}").unwrap();
        assert_eq!(resume.template_id, "professional");
        assert!(resume.experience.is_empty());
        assert!(resume.ats_data.is_none());
    }

    #[test]
    fn test_document_round_trips_camel_case() {
        let json = serde_json::json!({
            "personalInfo": {"fullName": "Ada Lovelace", "email": "ada@example.com"},
            "experience": [{
                "company": "Analytical Engines",
                "role": "Engineer",
                "bullets": [{"original": "Wrote the first program", "isAIRewritten": false}]
            }],
            "atsData": {"targetJD": "some jd", "atsScore": 72}
        });
        let resume: Resume = serde_json::from_value(json).unwrap();
        assert_eq!(
            resume.personal_info.full_name.as_deref(),
            Some("Ada Lovelace")
        );
        assert_eq!(resume.ats_data.as_ref().unwrap().ats_score, 72);

        let back = serde_json::to_value(&resume).unwrap();
        assert!(back["personalInfo"]["fullName"].is_string());
        assert_eq!(back["atsData"]["targetJD"], "some jd");
        assert!(back["experience"][0]["bullets"][0]["isAIRewritten"].is_boolean());
    }

    #[test]
    fn test_missing_bullet_id_gets_generated() {
        let bullet: BulletPoint =
            serde_json::from_str(r#"{"original": "did a thing"}"#).unwrap();
        assert!(!bullet.id.is_empty());
    }

    #[test]
    fn test_word_counts_use_rewritten_when_present() {
        let mut resume = Resume {
            experience: vec![Experience {
                bullets: vec![
                    BulletPoint {
                        original: Some("one two three".to_string()),
                        ..Default::default()
                    },
                    BulletPoint {
                        original: Some("one two three".to_string()),
                        rewritten: Some("one  two".to_string()),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            }],
            ..Default::default()
        };
        resume.apply_word_counts();
        let bullets = &resume.experience[0].bullets;
        assert_eq!(bullets[0].word_count, Some(3));
        assert_eq!(bullets[1].word_count, Some(2));
    }

    #[test]
    fn test_word_count_none_for_empty_bullet() {
        let mut resume = Resume {
            projects: vec![Project {
                bullets: vec![BulletPoint::default()],
                ..Default::default()
            }],
            ..Default::default()
        };
        resume.apply_word_counts();
        assert_eq!(resume.projects[0].bullets[0].word_count, None);
    }

    #[test]
    fn test_validate_accepts_reasonable_resume() {
        let resume = Resume {
            personal_info: PersonalInfo {
                full_name: Some("Grace Hopper".to_string()),
                email: Some("grace@navy.mil".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(resume.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let resume = Resume {
            personal_info: PersonalInfo {
                email: Some("not-an-email".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(resume.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_too_many_experience_bullets() {
        let resume = Resume {
            experience: vec![Experience {
                bullets: (0..9).map(|_| BulletPoint::default()).collect(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(resume.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_summary() {
        let resume = Resume {
            personal_info: PersonalInfo {
                summary: Some("x".repeat(501)),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(resume.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_too_many_technical_skills() {
        let resume = Resume {
            skills: Skills {
                technical: (0..21).map(|i| format!("skill{i}")).collect(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(resume.validate().is_err());
    }

    #[test]
    fn test_record_flattens_document_fields() {
        let row = ResumeRow {
            id: Uuid::new_v4(),
            data: serde_json::json!({"personalInfo": {"fullName": "Ada"}}),
            status: STATUS_DRAFT.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let record = row.into_record().unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["personalInfo"]["fullName"], "Ada");
        assert_eq!(json["status"], "draft");
        assert!(json["id"].is_string());
        assert!(json["createdAt"].is_string());
    }
}
