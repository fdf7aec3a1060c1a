use thiserror::Error;

use crate::extraction::models::ExtractionReport;

/// Document-level failures. Field-level misses never surface here; they are
/// diagnostics on the report.
///
/// Both variants carry the `error` report that belongs in the audit log.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Document contains no extractable text")]
    EmptyDocument { report: ExtractionReport },

    #[error("Profile is missing required fields: {}", missing.join(", "))]
    ProfileValidation {
        missing: Vec<String>,
        report: ExtractionReport,
    },
}

impl ExtractionError {
    pub fn report(&self) -> &ExtractionReport {
        match self {
            ExtractionError::EmptyDocument { report }
            | ExtractionError::ProfileValidation { report, .. } => report,
        }
    }
}
