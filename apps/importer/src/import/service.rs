//! Import service: sequences decode, extraction, persistence and audit.
//!
//! Every attempt that gets past the active check leaves exactly one audit
//! record, whatever the outcome, unless the audit write itself fails. The profile is only written once the
//! pipeline has validated it.

use anyhow::anyhow;
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{run_pipeline, ExtractionReport};
use crate::import::decoder::Upload;
use crate::import::store::StoredProfile;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub profile: StoredProfile,
    pub report: ExtractionReport,
}

pub async fn import_document(
    state: &AppState,
    user_id: Uuid,
    upload: Upload,
) -> Result<ImportResponse, AppError> {
    let extraction = &state.config.extraction;
    if !extraction.active {
        warn!(
            "Rejected import for user {user_id}: extraction config {} is inactive",
            extraction.version
        );
        return Err(AppError::ExtractionDisabled(extraction.version.clone()));
    }

    info!(
        "Importing résumé for user {user_id} ({} bytes, {:?})",
        upload.data.len(),
        upload.file_name
    );

    let document = match state.decoder.decode(&upload).await {
        Ok(document) => document,
        Err(err) => {
            warn!("Decode failed for user {user_id}: {err}");
            let report =
                ExtractionReport::failed(err.to_string(), vec![], 0, &extraction.version);
            record_attempt(state, user_id, &report).await;
            return Err(err.into());
        }
    };

    let page_count = document.page_count;
    let config = extraction.clone();
    let imported_at = Utc::now();
    let outcome = match tokio::task::spawn_blocking(move || {
        run_pipeline(&document, &config, imported_at)
    })
    .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            let message = format!("Extraction task failed: {e}");
            warn!("{message} (user {user_id})");
            let report =
                ExtractionReport::failed(message.clone(), vec![], page_count, &extraction.version);
            record_attempt(state, user_id, &report).await;
            return Err(anyhow!(message).into());
        }
    };

    let (profile, report) = match outcome {
        Ok(result) => result,
        Err(err) => {
            warn!("Extraction failed for user {user_id}: {err}");
            record_attempt(state, user_id, err.report()).await;
            return Err(err.into());
        }
    };

    let stored = match state.profiles.upsert(user_id, &profile).await {
        Ok(stored) => stored,
        Err(e) => {
            warn!("Failed to store profile for user {user_id}: {e:?}");
            let failed = ExtractionReport::failed(
                format!("Profile could not be stored: {e}"),
                report.diagnostics.clone(),
                report.page_count,
                &report.config_version,
            );
            record_attempt(state, user_id, &failed).await;
            return Err(e.into());
        }
    };
    record_attempt(state, user_id, &report).await;

    info!(
        "Imported profile for user {user_id}: status={}, {} experience, {} education, {} skills",
        report.overall_status.as_str(),
        stored.profile.experience.len(),
        stored.profile.education.len(),
        stored.profile.skills.len()
    );

    Ok(ImportResponse {
        profile: stored,
        report,
    })
}

async fn record_attempt(state: &AppState, user_id: Uuid, report: &ExtractionReport) {
    if let Err(e) = state.audit_log.append(user_id, report).await {
        warn!("Failed to record import attempt for user {user_id}: {e:?}");
    }
}
