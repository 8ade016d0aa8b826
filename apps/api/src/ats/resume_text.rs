//! Assembles the searchable text the scorer matches keywords against.

use crate::models::resume::{BulletPoint, Resume};

/// Which version of a bullet counts as its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletTextMode {
    /// Rewritten text only once the user has accepted it. The rule used
    /// for scoring a résumé as it stands.
    AcceptedOnly,
    /// Any rewritten text, accepted or not. Used by the optimize workflow
    /// to project the score a résumé would reach if its pending rewrites
    /// were accepted.
    PreferRewritten,
}

/// Concatenates all free-text fields of a résumé into one lower-cased,
/// space-joined string: summary, each experience's role/company and bullet
/// text, each project's title/technologies and bullet text, and the
/// technical/tools/soft skill lists. Empty and absent fields are skipped;
/// education entries carry no keyword signal and are not included.
pub fn build_resume_text(resume: &Resume, mode: BulletTextMode) -> String {
    let mut parts: Vec<&str> = Vec::new();

    if let Some(summary) = resume.personal_info.summary.as_deref() {
        parts.push(summary);
    }

    for experience in &resume.experience {
        push_opt(&mut parts, experience.role.as_deref());
        push_opt(&mut parts, experience.company.as_deref());
        for bullet in &experience.bullets {
            push_opt(&mut parts, effective_bullet_text(bullet, mode));
        }
    }

    for project in &resume.projects {
        push_opt(&mut parts, project.title.as_deref());
        parts.extend(project.technologies.iter().map(String::as_str));
        for bullet in &project.bullets {
            push_opt(&mut parts, effective_bullet_text(bullet, mode));
        }
    }

    parts.extend(resume.skills.technical.iter().map(String::as_str));
    parts.extend(resume.skills.tools.iter().map(String::as_str));
    parts.extend(resume.skills.soft.iter().map(String::as_str));

    parts.retain(|p| !p.trim().is_empty());
    parts.join(" ").to_lowercase()
}

fn effective_bullet_text(bullet: &BulletPoint, mode: BulletTextMode) -> Option<&str> {
    let use_rewritten = match mode {
        BulletTextMode::AcceptedOnly => bullet.accepted && bullet.rewritten.is_some(),
        BulletTextMode::PreferRewritten => bullet.rewritten.is_some(),
    };
    if use_rewritten {
        bullet.rewritten.as_deref()
    } else {
        bullet.original.as_deref()
    }
}

fn push_opt<'a>(parts: &mut Vec<&'a str>, value: Option<&'a str>) {
    if let Some(v) = value {
        parts.push(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Experience, Project, Skills};

    fn bullet(original: &str, rewritten: Option<&str>, accepted: bool) -> BulletPoint {
        BulletPoint {
            original: Some(original.to_string()),
            rewritten: rewritten.map(str::to_string),
            accepted,
            ..Default::default()
        }
    }

    fn resume_with_one_bullet(b: BulletPoint) -> Resume {
        Resume {
            experience: vec![Experience {
                role: Some("Backend Engineer".to_string()),
                company: Some("Acme".to_string()),
                bullets: vec![b],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_resume_yields_empty_text() {
        assert_eq!(
            build_resume_text(&Resume::default(), BulletTextMode::AcceptedOnly),
            ""
        );
    }

    #[test]
    fn test_text_is_lowercased_and_space_joined() {
        let resume = resume_with_one_bullet(bullet("Shipped THE Service", None, false));
        let text = build_resume_text(&resume, BulletTextMode::AcceptedOnly);
        assert_eq!(text, "backend engineer acme shipped the service");
    }

    #[test]
    fn test_accepted_rewrite_replaces_original() {
        let resume =
            resume_with_one_bullet(bullet("old text", Some("Rewritten with Kafka"), true));
        let text = build_resume_text(&resume, BulletTextMode::AcceptedOnly);
        assert!(text.contains("rewritten with kafka"));
        assert!(!text.contains("old text"));
    }

    #[test]
    fn test_unaccepted_rewrite_is_ignored_for_scoring() {
        let resume =
            resume_with_one_bullet(bullet("old text", Some("Rewritten with Kafka"), false));
        let text = build_resume_text(&resume, BulletTextMode::AcceptedOnly);
        assert!(text.contains("old text"));
        assert!(!text.contains("kafka"));
    }

    #[test]
    fn test_prefer_rewritten_projects_pending_rewrites() {
        let resume =
            resume_with_one_bullet(bullet("old text", Some("Rewritten with Kafka"), false));
        let text = build_resume_text(&resume, BulletTextMode::PreferRewritten);
        assert!(text.contains("kafka"));
        assert!(!text.contains("old text"));
    }

    #[test]
    fn test_projects_and_skills_are_included() {
        let resume = Resume {
            projects: vec![Project {
                title: Some("Feed Ranker".to_string()),
                technologies: vec!["Rust".to_string(), "Postgres".to_string()],
                bullets: vec![bullet("ranked posts by engagement", None, false)],
                ..Default::default()
            }],
            skills: Skills {
                technical: vec!["Tokio".to_string()],
                tools: vec!["Docker".to_string()],
                soft: vec!["Mentoring".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        let text = build_resume_text(&resume, BulletTextMode::AcceptedOnly);
        assert_eq!(
            text,
            "feed ranker rust postgres ranked posts by engagement tokio docker mentoring"
        );
    }

    #[test]
    fn test_empty_fields_are_skipped() {
        let resume = Resume {
            experience: vec![Experience {
                role: Some(String::new()),
                company: None,
                bullets: vec![BulletPoint::default()],
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(build_resume_text(&resume, BulletTextMode::AcceptedOnly), "");
    }
}
