//! Profile assembler: merges extractor outcomes into a candidate profile and
//! applies the record-level rules (trimming, duplicate entries removed,
//! skill caps).

use chrono::{DateTime, Utc};

use crate::extraction::models::{EducationEntry, ExperienceEntry, ExtractedProfile};
use crate::extraction::skills::{skill_length_ok, MAX_SKILLS};
use crate::extraction::strategy::FieldOutcome;

/// Raw outcomes of the five field extractors for one document.
#[derive(Debug, Clone)]
pub struct FieldResults {
    pub name: FieldOutcome<String>,
    pub email: FieldOutcome<String>,
    pub experience: FieldOutcome<Vec<ExperienceEntry>>,
    pub education: FieldOutcome<Vec<EducationEntry>>,
    pub skills: FieldOutcome<Vec<String>>,
}

pub fn assemble_profile(fields: &FieldResults, imported_at: DateTime<Utc>) -> ExtractedProfile {
    let experience = dedup_preserving_order(
        fields
            .experience
            .value()
            .map(|entries| entries.iter().map(trim_experience).collect())
            .unwrap_or_default(),
    );
    let education = dedup_preserving_order(
        fields
            .education
            .value()
            .map(|entries| entries.iter().map(trim_education).collect())
            .unwrap_or_default(),
    );
    let skills = fields
        .skills
        .value()
        .map(|skills| {
            skills
                .iter()
                .map(|s| s.trim())
                .filter(|s| skill_length_ok(s))
                .take(MAX_SKILLS)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    ExtractedProfile {
        name: non_blank(fields.name.value()),
        email: non_blank(fields.email.value()),
        experience,
        education,
        skills,
        imported_at,
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn trim_experience(entry: &ExperienceEntry) -> ExperienceEntry {
    ExperienceEntry {
        title: entry.title.trim().to_string(),
        company: entry.company.trim().to_string(),
        duration: entry.duration.trim().to_string(),
        description: entry.description.trim().to_string(),
    }
}

fn trim_education(entry: &EducationEntry) -> EducationEntry {
    EducationEntry {
        degree: entry.degree.trim().to_string(),
        institution: entry.institution.trim().to_string(),
        year: entry.year.trim().to_string(),
    }
}

fn dedup_preserving_order<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut unique: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found<T>(value: T) -> FieldOutcome<T> {
        FieldOutcome::Found {
            value,
            strategy: "test",
        }
    }

    fn job(title: &str) -> ExperienceEntry {
        ExperienceEntry {
            title: title.to_string(),
            company: "Acme".to_string(),
            duration: "2020".to_string(),
            description: String::new(),
        }
    }

    fn fields() -> FieldResults {
        FieldResults {
            name: found("  Ada Lovelace ".to_string()),
            email: FieldOutcome::missing("none"),
            experience: found(vec![job("Engineer"), job(" Engineer "), job("Manager")]),
            education: FieldOutcome::missing("none"),
            skills: found(vec![
                "Rust".to_string(),
                "Go".to_string(),
                " SQL ".to_string(),
            ]),
        }
    }

    #[test]
    fn test_scalars_trimmed_and_missing_is_none() {
        let profile = assemble_profile(&fields(), Utc::now());
        assert_eq!(profile.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(profile.email, None);
    }

    #[test]
    fn test_duplicate_entries_removed_after_trim() {
        let profile = assemble_profile(&fields(), Utc::now());
        let titles: Vec<_> = profile.experience.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Engineer", "Manager"]);
        assert!(profile.education.is_empty());
    }

    #[test]
    fn test_skill_bounds_reapplied() {
        let profile = assemble_profile(&fields(), Utc::now());
        assert_eq!(profile.skills, vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_blank_name_becomes_none() {
        let mut f = fields();
        f.name = found("   ".to_string());
        assert_eq!(assemble_profile(&f, Utc::now()).name, None);
    }
}
