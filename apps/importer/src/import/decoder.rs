//! Document decoder: turns an uploaded file into a `RawDocument`.
//!
//! Failures here are reported to the caller as `DecodeError` before the
//! extraction pipeline runs.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

use crate::extraction::models::RawDocument;

const PDF_MAGIC: &[u8] = b"%PDF-";
const ENCRYPT_MARKER: &[u8] = b"/Encrypt";

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Document is encrypted")]
    Encrypted,

    #[error("Document could not be decoded: {0}")]
    Malformed(String),

    #[error("Document contains no extractable text")]
    NoText,
}

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    PlainText,
}

impl Upload {
    pub fn format(&self) -> Option<DocumentFormat> {
        let content_type = self.content_type.as_deref().unwrap_or("").to_lowercase();
        let extension = self
            .file_name
            .as_deref()
            .and_then(|n| n.rsplit_once('.'))
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        if content_type == "application/pdf" || extension == "pdf" || self.data.starts_with(PDF_MAGIC)
        {
            Some(DocumentFormat::Pdf)
        } else if content_type.starts_with("text/") || matches!(extension.as_str(), "txt" | "md") {
            Some(DocumentFormat::PlainText)
        } else {
            None
        }
    }
}

#[async_trait]
pub trait DocumentDecoder: Send + Sync {
    async fn decode(&self, upload: &Upload) -> Result<RawDocument, DecodeError> {
        let document = match upload.format() {
            Some(DocumentFormat::Pdf) => RawDocument::new(decode_pdf(upload.data.clone()).await?),
            Some(DocumentFormat::PlainText) => {
                let text = String::from_utf8(upload.data.to_vec()).map_err(|e| {
                    DecodeError::Malformed(format!("text is not valid UTF-8: {e}"))
                })?;
                RawDocument::from_text(&text)
            }
            None => {
                return Err(DecodeError::UnsupportedFormat(
                    upload
                        .content_type
                        .clone()
                        .or_else(|| upload.file_name.clone())
                        .unwrap_or_else(|| "unknown".to_string()),
                ))
            }
        };

        if document.pages.iter().all(|page| page.trim().is_empty()) {
            return Err(DecodeError::NoText);
        }

        debug!(
            "Decoded {:?} upload into {} page(s), {} bytes of text",
            upload.format(),
            document.page_count,
            document.pages.iter().map(String::len).sum::<usize>()
        );
        Ok(document)
    }
}

/// Decoder for PDF and plain-text uploads.
pub struct FileDecoder;

#[async_trait]
impl DocumentDecoder for FileDecoder {}

/// One string per PDF page, in page order.
async fn decode_pdf(data: Bytes) -> Result<Vec<String>, DecodeError> {
    if contains(&data, ENCRYPT_MARKER) {
        return Err(DecodeError::Encrypted);
    }
    // pdf-extract is CPU-bound and can panic on corrupt input.
    tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem_by_pages(&data).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| DecodeError::Malformed(format!("PDF decoder aborted: {e}")))?
    .map_err(DecodeError::Malformed)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
