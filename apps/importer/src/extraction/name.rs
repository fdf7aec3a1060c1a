//! Name extractor.
//!
//! Cascade: `Name:` label at the start of a line, header line among the first
//! five lines, two capitalized words in the Contact section, then two
//! capitalized words at the start of any line.

use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::models::SectionName;
use crate::extraction::segmenter::{is_heading_line, SegmentedDocument};
use crate::extraction::strategy::{first_match, FieldOutcome, Strategy};

const HEADER_SCAN_LINES: usize = 5;
const HEADER_MIN_LEN: usize = 5;
const HEADER_MAX_LEN: usize = 50;

static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:full[ \t]+)?name[ \t]*:[ \t]*([^\n]*)")
        .expect("valid name label regex")
});

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-z'][A-Za-z'.\-]*(?: [A-Z][a-z'][A-Za-z'.\-]*){1,2}$")
        .expect("valid header name regex")
});

static TWO_WORDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][a-z]+[ \t]+[A-Z][a-z]+)\b").expect("valid two-word name regex")
});

static LINE_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*([A-Z][a-z]+[ \t]+[A-Z][a-z]+)\b").expect("valid line-start name regex")
});

const STRATEGIES: &[Strategy<String>] = &[
    Strategy {
        name: "label",
        run: from_label,
    },
    Strategy {
        name: "header",
        run: from_header,
    },
    Strategy {
        name: "contact_section",
        run: from_contact_section,
    },
    Strategy {
        name: "line_start",
        run: from_line_start,
    },
];

pub fn extract_name(doc: &SegmentedDocument) -> FieldOutcome<String> {
    first_match("name", doc, STRATEGIES)
}

fn from_label(doc: &SegmentedDocument) -> Option<String> {
    LABEL_RE
        .captures_iter(&doc.text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .find(|name| !name.is_empty())
}

fn from_header(doc: &SegmentedDocument) -> Option<String> {
    doc.text
        .lines()
        .take(HEADER_SCAN_LINES)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find(|line| {
            (HEADER_MIN_LEN..=HEADER_MAX_LEN).contains(&line.chars().count())
                && HEADER_RE.is_match(line)
                && !is_heading_line(line)
        })
        .map(String::from)
}

fn from_contact_section(doc: &SegmentedDocument) -> Option<String> {
    let contact = doc.section_text(SectionName::Contact)?;
    TWO_WORDS_RE
        .captures(contact)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn from_line_start(doc: &SegmentedDocument) -> Option<String> {
    LINE_START_RE
        .captures(&doc.text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
