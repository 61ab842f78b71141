//! Core data types

pub mod document;
pub mod response;
pub mod session;

pub use document::{Chunk, Document};
pub use response::{ChatResponse, Citation, StreamEvent, SummaryResponse};
pub use session::{Message, Role, Session};
