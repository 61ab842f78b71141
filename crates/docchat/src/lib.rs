//! docchat: retrieval-augmented chat over uploaded documents
//!
//! Users upload documents, ask natural-language questions about them, and get
//! answers grounded in the uploaded content with page-level citations and a
//! token-streamed reply. Retrieval is lexical (keyword overlap over chunks);
//! answer generation is pluggable across network providers with a
//! deterministic offline stand-in.

pub mod chat;
pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod persistence;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod session;
pub mod types;

pub use config::ChatConfig;
pub use error::{Error, Result};
pub use types::{
    document::{Chunk, Document},
    response::{ChatResponse, Citation, StreamEvent, SummaryResponse},
    session::{Message, Role, Session},
};
