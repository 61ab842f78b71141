//! Document and chunk types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ingestion::chunker::chunk_text;
use crate::ingestion::extract::ExtractedText;

/// A chunk of text from a document, the unit of retrieval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique chunk ID
    pub id: Uuid,
    /// Text content
    pub text: String,
    /// Chunk index within the document (extraction order)
    pub chunk_index: u32,
    /// Page number attribution (1-indexed)
    pub page_number: u32,
    /// Reserved for a future embedding; unused by lexical ranking
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub embedding: Option<Vec<f32>>,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(text: String, chunk_index: u32, page_number: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            chunk_index,
            page_number,
            embedding: None,
        }
    }
}

/// A document with its extracted text and chunk sequence
///
/// Immutable once created. Sessions hold documents behind `Arc`, so attaching
/// a document to a session shares it rather than copying it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document ID
    pub id: Uuid,
    /// Original filename as uploaded
    pub filename: String,
    /// Full extracted text
    pub text: String,
    /// Total page count reported by extraction
    pub pages: u32,
    /// Ordered chunk sequence; order equals extraction order and never changes
    pub chunks: Vec<Chunk>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// Build a document from extracted text, chunking it at `max_chunk_size`
    ///
    /// The extraction interface surfaces only the full text and a page count,
    /// so every chunk is attributed to page 1. The `page_number` field leaves
    /// room for a page-aware extractor.
    pub fn from_extracted(filename: String, extracted: ExtractedText, max_chunk_size: usize) -> Self {
        let chunks = chunk_text(&extracted.text, max_chunk_size)
            .into_iter()
            .enumerate()
            .map(|(i, text)| Chunk::new(text, i as u32, 1))
            .collect();

        Self {
            id: Uuid::new_v4(),
            filename,
            text: extracted.text,
            pages: extracted.pages,
            chunks,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_extracted_preserves_chunk_order() {
        let text = "alpha ".repeat(600); // forces multiple chunks at 2000 chars
        let extracted = ExtractedText {
            text: text.clone(),
            pages: 3,
        };
        let doc = Document::from_extracted("a.pdf".to_string(), extracted, 2000);

        assert_eq!(doc.pages, 3);
        assert!(doc.chunks.len() > 1);
        for (i, chunk) in doc.chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_index, i as u32);
            assert_eq!(chunk.page_number, 1);
            assert!(chunk.embedding.is_none());
        }
    }

    #[test]
    fn short_text_yields_single_chunk() {
        let extracted = ExtractedText {
            text: "Cats are mammals. Dogs are mammals too.".to_string(),
            pages: 1,
        };
        let doc = Document::from_extracted("pets.txt".to_string(), extracted, 2000);
        assert_eq!(doc.chunks.len(), 1);
        assert_eq!(doc.chunks[0].text, "Cats are mammals. Dogs are mammals too.");
    }
}
