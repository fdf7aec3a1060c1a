use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::models::SectionName;
use crate::extraction::segmenter::SegmentedDocument;
use crate::extraction::strategy::{first_match, FieldOutcome, Strategy};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("valid email regex")
});

const STRATEGIES: &[Strategy<String>] = &[
    Strategy {
        name: "global_scan",
        run: from_whole_document,
    },
    Strategy {
        name: "contact_section",
        run: from_contact_section,
    },
];

/// Global scan first; the Contact section is only consulted when that fails.
///
/// The Contact section is a span of the same text, so the fallback never
/// matches once the global scan has failed.
pub fn extract_email(doc: &SegmentedDocument) -> FieldOutcome<String> {
    first_match("email", doc, STRATEGIES)
}

fn from_whole_document(doc: &SegmentedDocument) -> Option<String> {
    find_email(&doc.text)
}

fn from_contact_section(doc: &SegmentedDocument) -> Option<String> {
    doc.section_text(SectionName::Contact).and_then(find_email)
}

fn find_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}
