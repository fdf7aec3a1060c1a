//! Experience extractor.
//!
//! Works over the Experience section, or the whole document when no such
//! heading was found. The text is cut into job chunks at blank lines and right
//! after any line that carries a year or month name. Each chunk is matched
//! independently for a title, a company and a duration; only chunks with both
//! a title and a company become entries.

use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::models::{ExperienceEntry, SectionName, DURATION_NOT_SPECIFIED};
use crate::extraction::segmenter::SegmentedDocument;
use crate::extraction::strategy::FieldOutcome;

static DATE_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:(?:19|20)\d{2}|January|February|March|April|May|June|July|August|September|October|November|December|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sep|Sept|Oct|Nov|Dec)\b",
    )
    .expect("valid date marker regex")
});

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b((?:[A-Z][A-Za-z/&+.\-]*[ \t]+){0,4}(?:Engineer|Developer|Manager|Analyst|Specialist|Designer|Consultant|Architect|Director|Scientist|Administrator|Coordinator|Intern|Lead))\b",
    )
    .expect("valid job title regex")
});

static COMPANY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:\bat|@)[ \t]+([^\n,|]+?)[ \t]*(?:,|\||\b(?:19|20)\d{2}\b|$)")
        .expect("valid company regex")
});

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?[ \t]+)?(?:19|20)\d{2}(?:[ \t]*(?:-|–|—|to)[ \t]*(?:(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?[ \t]+)?(?:(?:19|20)\d{2}|present|current|now))?\b",
    )
    .expect("valid duration regex")
});

pub fn extract_experience(doc: &SegmentedDocument) -> FieldOutcome<Vec<ExperienceEntry>> {
    let (source, strategy) = match doc.section_text(SectionName::Experience) {
        Some(section) => (section, "experience_section"),
        None => (doc.text.as_str(), "whole_document"),
    };

    let entries: Vec<ExperienceEntry> = split_chunks(source)
        .iter()
        .filter_map(|chunk| parse_chunk(chunk))
        .collect();

    if entries.is_empty() {
        FieldOutcome::missing(format!(
            "No experience entries with both a job title and a company ({strategy})"
        ))
    } else {
        tracing::debug!("experience: {} entr(ies) from {strategy}", entries.len());
        FieldOutcome::Found {
            value: entries,
            strategy,
        }
    }
}

fn split_chunks(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            flush(&mut current, &mut chunks);
            continue;
        }
        current.push(line);
        if DATE_MARKER_RE.is_match(line) {
            flush(&mut current, &mut chunks);
        }
    }
    flush(&mut current, &mut chunks);
    chunks
}

fn flush(current: &mut Vec<&str>, chunks: &mut Vec<String>) {
    if !current.is_empty() {
        chunks.push(current.join("\n"));
        current.clear();
    }
}

fn parse_chunk(chunk: &str) -> Option<ExperienceEntry> {
    let title = TITLE_RE
        .captures(chunk)?
        .get(1)?
        .as_str()
        .trim()
        .to_string();
    let company = COMPANY_RE
        .captures(chunk)?
        .get(1)?
        .as_str()
        .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '–' | '—' | '('))
        .trim()
        .to_string();
    if title.is_empty() || company.is_empty() {
        return None;
    }

    let duration = DURATION_RE
        .find(chunk)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| DURATION_NOT_SPECIFIED.to_string());

    let description = chunk
        .replacen(&title, "", 1)
        .replacen(&company, "", 1)
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    Some(ExperienceEntry {
        title,
        company,
        duration,
        description,
    })
}
