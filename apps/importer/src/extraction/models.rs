use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DURATION_NOT_SPECIFIED: &str = "Duration not specified";
pub const INSTITUTION_NOT_SPECIFIED: &str = "Institution not specified";
pub const YEAR_NOT_SPECIFIED: &str = "Year not specified";

/// Decoded document text, one string per page. Owned by a single pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    pub pages: Vec<String>,
    pub page_count: usize,
}

impl RawDocument {
    pub fn new(pages: Vec<String>) -> Self {
        let page_count = pages.len();
        Self { pages, page_count }
    }

    /// Splits plain text into pages on form-feed breaks.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.split('\x0c').map(String::from).collect())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SectionName {
    Contact,
    Experience,
    Education,
    Skills,
    Unknown,
}

/// A heuristically located span of the normalized document.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub name: SectionName,
    /// Byte offset of the section body within the normalized text.
    pub start: usize,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub imported_at: DateTime<Utc>,
}

impl ExtractedProfile {
    /// A profile may only be persisted when at least one essential field is present.
    pub fn is_valid(&self) -> bool {
        self.name.is_some() || self.email.is_some()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticStatus {
    Found,
    Missing,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractionDiagnostic {
    pub field: String,
    pub status: DiagnosticStatus,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Success,
    Warning,
    Error,
}

impl OverallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Success => "success",
            OverallStatus::Warning => "warning",
            OverallStatus::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "success" => Some(OverallStatus::Success),
            "warning" => Some(OverallStatus::Warning),
            "error" => Some(OverallStatus::Error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractionReport {
    pub overall_status: OverallStatus,
    pub diagnostics: Vec<ExtractionDiagnostic>,
    pub page_count: usize,
    pub config_version: String,
    /// Document-level message, set on `error` reports.
    pub message: Option<String>,
}

impl ExtractionReport {
    /// An `error` report for an attempt that failed before or during extraction.
    pub fn failed(
        message: impl Into<String>,
        diagnostics: Vec<ExtractionDiagnostic>,
        page_count: usize,
        config_version: &str,
    ) -> Self {
        Self {
            overall_status: OverallStatus::Error,
            diagnostics,
            page_count,
            config_version: config_version.to_string(),
            message: Some(message.into()),
        }
    }
}

/// Extraction settings handed to every pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    pub version: String,
    pub active: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            version: "v1".to_string(),
            active: true,
        }
    }
}
