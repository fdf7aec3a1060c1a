// Résumé import boundary.
// Decodes uploads, runs the extraction pipeline, persists the profile and
// records every attempt in the audit log.

pub mod decoder;
pub mod handlers;
pub mod service;
pub mod store;
