//! Best-effort durable persistence
//!
//! The in-memory store is authoritative; a durable backend may mirror
//! sessions, documents, and messages for authenticated users. Writes are
//! best-effort: failures are logged and never propagated, so a broken
//! backend cannot fail a chat request.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::types::document::Document;
use crate::types::session::{Message, Session};

/// Durable mirror of chat state
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    /// Persist or update a session record
    async fn save_session(&self, session: &Session, user_id: &str) -> Result<()>;

    /// Persist a document record
    async fn save_document(&self, session_id: Uuid, document: &Document, user_id: &str)
        -> Result<()>;

    /// Persist a chat message
    async fn save_message(&self, session_id: Uuid, message: &Message, user_id: &str) -> Result<()>;
}

/// Persistence backend that stores nothing
///
/// Used when no durable store is configured; every write succeeds.
pub struct NoopPersistence;

#[async_trait]
impl PersistenceStore for NoopPersistence {
    async fn save_session(&self, _session: &Session, _user_id: &str) -> Result<()> {
        Ok(())
    }

    async fn save_document(
        &self,
        _session_id: Uuid,
        _document: &Document,
        _user_id: &str,
    ) -> Result<()> {
        Ok(())
    }

    async fn save_message(
        &self,
        _session_id: Uuid,
        _message: &Message,
        _user_id: &str,
    ) -> Result<()> {
        Ok(())
    }
}
