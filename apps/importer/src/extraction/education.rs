//! Education extractor.
//!
//! Degree phrases `(Bachelor|Master|PhD|Associate) … (in|of) <field>` are
//! located inside the Education section. For each degree the institution and
//! year are looked up in the text that follows it (up to the next degree),
//! then in the text that precedes it (back to the previous degree).

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::models::{
    EducationEntry, SectionName, INSTITUTION_NOT_SPECIFIED, YEAR_NOT_SPECIFIED,
};
use crate::extraction::segmenter::SegmentedDocument;
use crate::extraction::strategy::FieldOutcome;

static DEGREE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:Bachelor|Master|PhD|Ph\.D\.|Associate)[^\n,]*?\b(?:in|of)\b[^\n,]*")
        .expect("valid degree regex")
});

static INSTITUTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[A-Z][A-Za-z.&'\-]*[ \t]+)*(?:University|College|Institute)\b")
        .expect("valid institution regex")
});

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("valid year regex"));

pub fn extract_education(doc: &SegmentedDocument) -> FieldOutcome<Vec<EducationEntry>> {
    let Some(section) = doc.section_text(SectionName::Education) else {
        return FieldOutcome::missing("No Education section found");
    };

    let degrees: Vec<Range<usize>> = DEGREE_RE.find_iter(section).map(|m| m.range()).collect();
    if degrees.is_empty() {
        return FieldOutcome::missing("No degree phrase found in the Education section");
    }

    let entries: Vec<EducationEntry> = degrees
        .iter()
        .enumerate()
        .map(|(i, degree)| {
            let after = &section[degree.end..degrees.get(i + 1).map_or(section.len(), |d| d.start)];
            let before = &section[i.checked_sub(1).map_or(0, |p| degrees[p].end)..degree.start];

            let institution = find_in(&INSTITUTION_RE, after, before)
                .unwrap_or_else(|| INSTITUTION_NOT_SPECIFIED.to_string());
            let year =
                find_in(&YEAR_RE, after, before).unwrap_or_else(|| YEAR_NOT_SPECIFIED.to_string());

            EducationEntry {
                degree: section[degree.clone()].trim().to_string(),
                institution,
                year,
            }
        })
        .collect();

    tracing::debug!("education: {} entr(ies)", entries.len());
    FieldOutcome::Found {
        value: entries,
        strategy: "education_section",
    }
}

fn find_in(re: &Regex, primary: &str, secondary: &str) -> Option<String> {
    re.find(primary)
        .or_else(|| re.find(secondary))
        .map(|m| m.as_str().trim().to_string())
}
