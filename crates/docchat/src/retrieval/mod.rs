//! Lexical retrieval: relevance ranking, context assembly, citations

pub mod context;
pub mod ranker;

pub use context::{build_context, extract_citations, raw_fallback};
pub use ranker::rank_chunks;
