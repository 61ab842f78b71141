//! Response payloads and streaming events

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A page reference attached to an assistant answer
///
/// Page numbers are unique within one answer's citation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Page number (1-indexed)
    pub page: u32,
    /// Bounded preview of the cited chunk text
    pub text: String,
}

/// Answer to a chat question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The generated answer
    pub response: String,
    /// Session the answer belongs to
    pub session_id: Uuid,
    /// Whether the answer appears grounded in the document context
    pub answer_found: bool,
    /// Previews of the chunks used to build the context
    pub relevant_chunks: Vec<String>,
    /// Deduplicated page citations
    pub citations: Vec<Citation>,
}

/// Document summary with parsed structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Full summary text
    pub summary: String,
    /// Key takeaways parsed from the summary
    pub key_takeaways: Vec<String>,
    /// Main topics parsed from the summary
    pub main_topics: Vec<String>,
}

/// One event in a streamed answer
///
/// A stream is zero or more `Token` events followed by exactly one terminal
/// event (`Done` on success, `Error` on failure).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamEvent {
    /// A small multi-word fragment of the answer
    Token { content: String },
    /// Terminal success event carrying the complete answer
    Done {
        response: String,
        session_id: Uuid,
        answer_found: bool,
        citations: Vec<Citation>,
    },
    /// Terminal failure event
    Error { message: String, code: String },
}

impl StreamEvent {
    /// SSE event name for this kind
    pub fn name(&self) -> &'static str {
        match self {
            Self::Token { .. } => "token",
            Self::Done { .. } => "done",
            Self::Error { .. } => "error",
        }
    }

    /// Whether this event ends the stream
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Token { .. })
    }
}
