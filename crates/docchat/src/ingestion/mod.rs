//! Document ingestion: text extraction interface and chunking

pub mod chunker;
pub mod extract;

pub use chunker::chunk_text;
pub use extract::{ExtractedText, PlainTextExtractor, TextExtractor};
