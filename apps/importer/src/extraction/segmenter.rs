//! Section segmenter: a forward scan over heading keywords.
//!
//! Headings are recognised at the start of a line, case-insensitively, and may
//! be followed by `:` or `-`. Each section runs from the end of its heading to
//! the start of the next recognised heading. Detection is not layout-aware: a
//! line such as "Skills used: Rust" inside an experience block starts a new
//! Skills section and truncates the experience span there. Extractors were
//! tuned against exactly this behaviour.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::extraction::models::{Section, SectionName};

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(contact information|contact details|contact|personal information|personal details|work experience|professional experience|employment history|work history|employment|experience|education|academic background|academics|technical skills|core competencies|competencies|skills)\b[ \t]*[:\-–]?",
    )
    .expect("valid heading regex")
});

/// The normalized text together with the sections found in it.
#[derive(Debug, Clone)]
pub struct SegmentedDocument {
    pub text: String,
    pub sections: Vec<Section>,
}

impl SegmentedDocument {
    /// First section with the given name, in document order.
    pub fn section(&self, name: SectionName) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Body of the first section with the given name, if any.
    pub fn section_text(&self, name: SectionName) -> Option<&str> {
        self.section(name).map(|s| s.text.as_str())
    }
}

/// True when the line would be recognised as a section heading.
pub fn is_heading_line(line: &str) -> bool {
    HEADING_RE.is_match(line)
}

pub fn segment(text: String) -> SegmentedDocument {
    let sections = find_sections(&text);
    debug!(
        "Segmented document into {} section(s): {:?}",
        sections.len(),
        sections.iter().map(|s| s.name).collect::<Vec<_>>()
    );
    SegmentedDocument { text, sections }
}

fn find_sections(text: &str) -> Vec<Section> {
    // (name, heading start, body start)
    let headings: Vec<(SectionName, usize, usize)> = HEADING_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let keyword = caps.get(1)?;
            Some((classify_heading(keyword.as_str()), whole.start(), whole.end()))
        })
        .collect();

    let mut sections = Vec::with_capacity(headings.len() + 1);

    let preamble_end = headings.first().map_or(text.len(), |h| h.1);
    let preamble = &text[..preamble_end];
    if !preamble.trim().is_empty() {
        sections.push(Section {
            name: SectionName::Unknown,
            start: 0,
            text: preamble.trim().to_string(),
        });
    }

    for (i, &(name, _, body_start)) in headings.iter().enumerate() {
        let body_end = headings.get(i + 1).map_or(text.len(), |next| next.1);
        sections.push(Section {
            name,
            start: body_start,
            text: text[body_start..body_end].trim().to_string(),
        });
    }

    sections
}

fn classify_heading(keyword: &str) -> SectionName {
    let keyword = keyword.to_lowercase();
    if keyword.starts_with("contact") || keyword.starts_with("personal") {
        SectionName::Contact
    } else if keyword.contains("experience")
        || keyword.starts_with("employment")
        || keyword == "work history"
    {
        SectionName::Experience
    } else if keyword.starts_with("education") || keyword.starts_with("academic") {
        SectionName::Education
    } else if keyword.contains("skills") || keyword.contains("competencies") {
        SectionName::Skills
    } else {
        SectionName::Unknown
    }
}
