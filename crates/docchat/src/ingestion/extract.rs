//! Text extraction interface
//!
//! Raw document parsing (PDF, DOCX, ...) is an external collaborator. The
//! engine only depends on this trait: extraction yields the whole document
//! text plus a page count. Extractors may skip individual unreadable pages
//! silently, but must fail when no text is extractable at all.

use crate::error::{Error, Result};

/// Result of extracting text from a raw document
#[derive(Debug, Clone)]
pub struct ExtractedText {
    /// Full extracted text, non-empty
    pub text: String,
    /// Total page count
    pub pages: u32,
}

/// Extracts plain text from raw document bytes
pub trait TextExtractor: Send + Sync {
    /// Extract the full text and page count from a raw file
    fn extract(&self, raw: &[u8], filename: &str) -> Result<ExtractedText>;
}

/// Extractor for documents that are already plain UTF-8 text
///
/// Reports a single page; binary formats belong behind their own
/// `TextExtractor` implementations.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, raw: &[u8], filename: &str) -> Result<ExtractedText> {
        let text = String::from_utf8_lossy(raw).into_owned();
        if text.trim().is_empty() {
            return Err(Error::ExtractionFailed(format!(
                "no text could be extracted from {filename}"
            )));
        }

        Ok(ExtractedText { text, pages: 1 })
    }
}
