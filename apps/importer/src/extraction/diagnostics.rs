use crate::extraction::models::{
    DiagnosticStatus, ExtractionDiagnostic, ExtractionReport, OverallStatus,
};
use crate::extraction::strategy::FieldOutcome;

/// Collects per-field diagnostics in extraction order.
#[derive(Debug, Default)]
pub struct DiagnosticsBuilder {
    entries: Vec<ExtractionDiagnostic>,
}

impl DiagnosticsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a scalar field.
    pub fn record<T>(&mut self, field: &str, outcome: &FieldOutcome<T>) {
        let message = match outcome {
            FieldOutcome::Found { strategy, .. } => Some(format!("Matched by {strategy}")),
            FieldOutcome::Missing { reason } => Some(reason.clone()),
        };
        self.push(field, outcome.is_found(), message);
    }

    /// Records a list field, including the entry count when found.
    pub fn record_list<T>(&mut self, field: &str, outcome: &FieldOutcome<Vec<T>>) {
        let message = match outcome {
            FieldOutcome::Found { value, strategy } => {
                Some(format!("{} item(s) from {strategy}", value.len()))
            }
            FieldOutcome::Missing { reason } => Some(reason.clone()),
        };
        self.push(field, outcome.is_found(), message);
    }

    fn push(&mut self, field: &str, found: bool, message: Option<String>) {
        self.entries.push(ExtractionDiagnostic {
            field: field.to_string(),
            status: if found {
                DiagnosticStatus::Found
            } else {
                DiagnosticStatus::Missing
            },
            message,
        });
    }

    pub fn missing_fields(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|d| d.status == DiagnosticStatus::Missing)
            .map(|d| d.field.as_str())
            .collect()
    }

    pub fn into_entries(self) -> Vec<ExtractionDiagnostic> {
        self.entries
    }

    /// Builds the report for a profile that passed validation.
    pub fn into_report(self, page_count: usize, config_version: &str) -> ExtractionReport {
        let overall_status = classify(&self.entries);
        ExtractionReport {
            overall_status,
            diagnostics: self.entries,
            page_count,
            config_version: config_version.to_string(),
            message: None,
        }
    }
}

/// `success` when nothing is missing, `warning` otherwise. `error` is never
/// produced here; failed runs build their report with `ExtractionReport::failed`.
pub fn classify(diagnostics: &[ExtractionDiagnostic]) -> OverallStatus {
    if diagnostics
        .iter()
        .any(|d| d.status == DiagnosticStatus::Missing)
    {
        OverallStatus::Warning
    } else {
        OverallStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(value: &str) -> FieldOutcome<String> {
        FieldOutcome::Found {
            value: value.to_string(),
            strategy: "label",
        }
    }

    #[test]
    fn test_all_found_is_success() {
        let mut builder = DiagnosticsBuilder::new();
        builder.record("name", &found("Ada"));
        builder.record_list("skills", &FieldOutcome::Found {
            value: vec!["Rust"],
            strategy: "skills_section",
        });
        let report = builder.into_report(2, "v3");
        assert_eq!(report.overall_status, OverallStatus::Success);
        assert_eq!(report.page_count, 2);
        assert_eq!(report.config_version, "v3");
        assert_eq!(
            report.diagnostics[1].message.as_deref(),
            Some("1 item(s) from skills_section")
        );
    }

    #[test]
    fn test_any_missing_is_warning() {
        let mut builder = DiagnosticsBuilder::new();
        builder.record("email", &found("a@b.io"));
        builder.record::<String>("name", &FieldOutcome::missing("No name found"));
        assert_eq!(builder.missing_fields(), vec!["name"]);
        let report = builder.into_report(1, "v1");
        assert_eq!(report.overall_status, OverallStatus::Warning);
        assert_eq!(report.diagnostics[1].status, DiagnosticStatus::Missing);
        assert_eq!(report.diagnostics[1].message.as_deref(), Some("No name found"));
    }

    #[test]
    fn test_classify_empty_is_success() {
        assert_eq!(classify(&[]), OverallStatus::Success);
    }
}
