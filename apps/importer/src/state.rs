use std::sync::Arc;

use crate::config::Config;
use crate::import::decoder::DocumentDecoder;
use crate::import::store::{AuditLog, ProfileStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub decoder: Arc<dyn DocumentDecoder>,
    pub profiles: Arc<dyn ProfileStore>,
    /// Append-only record of every import attempt.
    pub audit_log: Arc<dyn AuditLog>,
}

#[cfg(test)]
impl AppState {
    /// State backed by the real decoder and in-memory persistence.
    pub fn in_memory(
        profiles: Arc<dyn ProfileStore>,
        audit_log: Arc<dyn AuditLog>,
        extraction: crate::extraction::ExtractionConfig,
    ) -> Self {
        Self {
            config: Config {
                database_url: "postgres://unused".to_string(),
                port: 0,
                rust_log: "debug".to_string(),
                extraction,
                max_upload_bytes: 1024 * 1024,
            },
            decoder: Arc::new(crate::import::decoder::FileDecoder),
            profiles,
            audit_log,
        }
    }
}
