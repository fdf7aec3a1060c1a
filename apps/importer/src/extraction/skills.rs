use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::models::SectionName;
use crate::extraction::segmenter::SegmentedDocument;
use crate::extraction::strategy::FieldOutcome;

pub const MAX_SKILLS: usize = 20;
pub const MIN_SKILL_LEN: usize = 3;
pub const MAX_SKILL_LEN: usize = 29;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Alphabetic}\p{Nd}+#.]+").expect("valid skill token regex")
});

/// Whether a token is within the accepted skill length bounds.
pub fn skill_length_ok(skill: &str) -> bool {
    (MIN_SKILL_LEN..=MAX_SKILL_LEN).contains(&skill.chars().count())
}

/// Tokenizes the Skills section, keeping the first `MAX_SKILLS` tokens whose
/// length falls within bounds.
pub fn extract_skills(doc: &SegmentedDocument) -> FieldOutcome<Vec<String>> {
    let Some(section) = doc.section_text(SectionName::Skills) else {
        return FieldOutcome::missing("No Skills section found");
    };

    let skills: Vec<String> = TOKEN_RE
        .find_iter(section)
        .map(|m| m.as_str().trim_end_matches('.'))
        .filter(|token| skill_length_ok(token))
        .take(MAX_SKILLS)
        .map(String::from)
        .collect();

    if skills.is_empty() {
        FieldOutcome::missing("Skills section contains no usable tokens")
    } else {
        FieldOutcome::Found {
            value: skills,
            strategy: "skills_section",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::segmenter::segment;

    fn skills_of(text: &str) -> Vec<String> {
        extract_skills(&segment(text.to_string()))
            .into_value()
            .unwrap_or_default()
    }

    #[test]
    fn test_tokens_in_document_order() {
        assert_eq!(
            skills_of("Skills\nPython, C++, Node.js; Kubernetes"),
            vec!["Python", "C++", "Node.js", "Kubernetes"]
        );
    }

    #[test]
    fn test_short_tokens_dropped() {
        assert_eq!(skills_of("Skills\nPython, Go, SQL, C#, R"), vec!["Python", "SQL"]);
    }

    #[test]
    fn test_long_tokens_dropped() {
        let long = "a".repeat(30);
        let max = "b".repeat(29);
        assert_eq!(skills_of(&format!("Skills\n{long} {max}")), vec![max]);
    }

    #[test]
    fn test_trailing_period_trimmed() {
        assert_eq!(skills_of("Skills: Rust, Haskell."), vec!["Rust", "Haskell"]);
    }

    #[test]
    fn test_capped_at_twenty() {
        let many: Vec<String> = (0..40).map(|i| format!("skill{i:02}")).collect();
        let skills = skills_of(&format!("Technical Skills\n{}", many.join(", ")));
        assert_eq!(skills.len(), MAX_SKILLS);
        assert_eq!(skills[0], "skill00");
        assert_eq!(skills[19], "skill19");
    }

    #[test]
    fn test_bounds_hold_for_noisy_input() {
        let inputs = [
            "Skills\n!!! ?? a bb ccc dddd ...... ++++ ####",
            "Core Competencies\nleadership, communication, x, yy, 0123456789012345678901234567890123",
            "Skills\n",
        ];
        for input in inputs {
            let skills = skills_of(input);
            assert!(skills.len() <= MAX_SKILLS);
            assert!(skills.iter().all(|s| skill_length_ok(s)), "{skills:?}");
        }
    }

    #[test]
    fn test_accented_tokens_kept_whole() {
        assert_eq!(
            skills_of("Skills\nFrançais, Rust, Développement"),
            vec!["Français", "Rust", "Développement"]
        );
    }

    #[test]
    fn test_missing_section() {
        assert!(!extract_skills(&segment("Python, Go".to_string())).is_found());
    }
}
