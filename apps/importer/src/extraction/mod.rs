// Résumé extraction core.
// Pure, synchronous and free of I/O: decoded pages in, profile + report out.
// Decoding, persistence and the audit log live in `crate::import`.

pub mod assembler;
pub mod diagnostics;
pub mod education;
pub mod email;
pub mod error;
pub mod experience;
pub mod models;
pub mod name;
pub mod normalizer;
pub mod pipeline;
pub mod segmenter;
pub mod skills;
pub mod strategy;

pub use error::ExtractionError;
pub use models::{ExtractedProfile, ExtractionConfig, ExtractionReport, RawDocument};
pub use pipeline::run_pipeline;
