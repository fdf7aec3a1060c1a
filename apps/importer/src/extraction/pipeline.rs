//! Extraction pipeline: raw pages in, `(ExtractedProfile, ExtractionReport)` out.
//!
//! Stages: NotStarted → Normalized → Segmented → FieldsExtracted → Validated,
//! or Failed on an empty document or a profile with neither name nor email.
//! The run is a pure function of the document, the config and `imported_at`.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::extraction::assembler::{assemble_profile, FieldResults};
use crate::extraction::diagnostics::DiagnosticsBuilder;
use crate::extraction::education::extract_education;
use crate::extraction::email::extract_email;
use crate::extraction::error::ExtractionError;
use crate::extraction::experience::extract_experience;
use crate::extraction::models::{
    ExtractedProfile, ExtractionConfig, ExtractionReport, RawDocument,
};
use crate::extraction::name::extract_name;
use crate::extraction::normalizer::normalize_pages;
use crate::extraction::segmenter::{segment, SegmentedDocument};
use crate::extraction::skills::extract_skills;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    NotStarted,
    Normalized,
    Segmented,
    FieldsExtracted,
    Validated,
    Failed,
}

struct StageTracker {
    stage: PipelineStage,
}

impl StageTracker {
    fn advance(&mut self, next: PipelineStage) {
        debug!("Pipeline stage {:?} -> {:?}", self.stage, next);
        self.stage = next;
    }
}

/// Runs the whole extraction pipeline over one decoded document.
pub fn run_pipeline(
    document: &RawDocument,
    config: &ExtractionConfig,
    imported_at: DateTime<Utc>,
) -> Result<(ExtractedProfile, ExtractionReport), ExtractionError> {
    let mut tracker = StageTracker {
        stage: PipelineStage::NotStarted,
    };

    let Some(text) = normalize_pages(&document.pages) else {
        tracker.advance(PipelineStage::Failed);
        warn!("Rejected empty document ({} page(s))", document.page_count);
        return Err(ExtractionError::EmptyDocument {
            report: ExtractionReport::failed(
                "Document contains no extractable text",
                vec![],
                document.page_count,
                &config.version,
            ),
        });
    };
    tracker.advance(PipelineStage::Normalized);

    let segmented = segment(text);
    tracker.advance(PipelineStage::Segmented);

    let fields = extract_fields(&segmented);
    tracker.advance(PipelineStage::FieldsExtracted);

    let mut diagnostics = DiagnosticsBuilder::new();
    diagnostics.record("name", &fields.name);
    diagnostics.record("email", &fields.email);
    diagnostics.record_list("experience", &fields.experience);
    diagnostics.record_list("education", &fields.education);
    diagnostics.record_list("skills", &fields.skills);

    let profile = assemble_profile(&fields, imported_at);

    if !profile.is_valid() {
        tracker.advance(PipelineStage::Failed);
        let missing = vec!["name".to_string(), "email".to_string()];
        let report = ExtractionReport::failed(
            format!("Missing required fields: {}", missing.join(", ")),
            diagnostics.into_entries(),
            document.page_count,
            &config.version,
        );
        warn!("Rejected profile without name or email");
        return Err(ExtractionError::ProfileValidation { missing, report });
    }
    tracker.advance(PipelineStage::Validated);

    let missing = diagnostics
        .missing_fields()
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>();
    let report = diagnostics.into_report(document.page_count, &config.version);
    info!(
        "Extracted profile: status {:?}, {} experience, {} education, {} skill(s), missing {:?}",
        report.overall_status,
        profile.experience.len(),
        profile.education.len(),
        profile.skills.len(),
        missing
    );

    Ok((profile, report))
}

/// The extractors only read the segmented document, so their order does not
/// affect the result.
fn extract_fields(doc: &SegmentedDocument) -> FieldResults {
    FieldResults {
        name: extract_name(doc),
        email: extract_email(doc),
        experience: extract_experience(doc),
        education: extract_education(doc),
        skills: extract_skills(doc),
    }
}
