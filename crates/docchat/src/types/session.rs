//! Session and message types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::document::Document;
use super::response::Citation;

/// Message author role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: Uuid,
    /// Author role
    pub role: Role,
    /// Message content
    pub content: String,
    /// Creation timestamp
    pub timestamp: DateTime<Utc>,
    /// Page citations; only ever set on assistant messages
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub citations: Option<Vec<Citation>>,
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
            citations: None,
        }
    }

    /// Create an assistant message with optional citations
    pub fn assistant(content: impl Into<String>, citations: Option<Vec<Citation>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            citations,
        }
    }
}

/// The unit of conversational state and retrieval scope
///
/// All documents attached to a session are pooled for relevance ranking.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique session ID
    pub id: Uuid,
    /// Attached documents in attachment order
    pub documents: Vec<Arc<Document>>,
    /// Ordered message history, append-only except on explicit clear
    pub messages: Vec<Message>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-activity timestamp, monotonically non-decreasing
    pub last_activity: DateTime<Utc>,
}

impl Session {
    /// Create a session with one initial document
    pub fn new(document: Arc<Document>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            documents: vec![document],
            messages: Vec::new(),
            created_at: now,
            last_activity: now,
        }
    }

    /// Refresh the last-activity timestamp without ever moving it backwards
    pub fn touch(&mut self) {
        let now = Utc::now();
        if now > self.last_activity {
            self.last_activity = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::extract::ExtractedText;

    fn doc() -> Arc<Document> {
        Arc::new(Document::from_extracted(
            "doc.txt".to_string(),
            ExtractedText {
                text: "hello world".to_string(),
                pages: 1,
            },
            2000,
        ))
    }

    #[test]
    fn touch_never_moves_backwards() {
        let mut session = Session::new(doc());
        let before = session.last_activity;
        session.touch();
        assert!(session.last_activity >= before);
    }

    #[test]
    fn citations_only_on_assistant_messages() {
        let user = Message::user("hi");
        assert!(user.citations.is_none());

        let citations = vec![Citation {
            page: 1,
            text: "preview".to_string(),
        }];
        let assistant = Message::assistant("answer", Some(citations));
        assert_eq!(assistant.role, Role::Assistant);
        assert_eq!(assistant.citations.as_ref().map(Vec::len), Some(1));
    }
}
