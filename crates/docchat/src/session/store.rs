//! In-memory session store
//!
//! The single source of truth for session, document, and message state. One
//! reader/writer lock guards the whole table: mutations take an exclusive
//! hold, reads a shared one, so operations on a single session serialize
//! while the critical sections stay small. Constructed once at startup and
//! lives for the process lifetime.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::document::Document;
use crate::types::session::{Message, Session};

/// Concurrency-safe session table
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with `document` as its sole initial member
    pub fn create(&self, document: Arc<Document>) -> Session {
        let session = Session::new(document);
        self.sessions.write().insert(session.id, session.clone());
        session
    }

    /// Fetch a session by ID
    pub fn get(&self, id: Uuid) -> Result<Session> {
        self.sessions
            .read()
            .get(&id)
            .cloned()
            .ok_or(Error::SessionNotFound(id))
    }

    /// Append a message to a session's history
    ///
    /// Returns the stored message and refreshes the session's last-activity
    /// timestamp.
    pub fn add_message(&self, id: Uuid, message: Message) -> Result<Message> {
        let mut sessions = self.sessions.write();
        let session = sessions.get_mut(&id).ok_or(Error::SessionNotFound(id))?;

        session.messages.push(message.clone());
        session.touch();
        Ok(message)
    }

    /// Attach a document to an existing session
    ///
    /// Rejects a document whose ID is already attached.
    pub fn add_document(&self, id: Uuid, document: Arc<Document>) -> Result<()> {
        let mut sessions = self.sessions.write();
        let session = sessions.get_mut(&id).ok_or(Error::SessionNotFound(id))?;

        if session.documents.iter().any(|d| d.id == document.id) {
            return Err(Error::DocumentAlreadyAttached(document.id));
        }

        session.documents.push(document);
        session.touch();
        Ok(())
    }

    /// Detach a document from a session
    pub fn remove_document(&self, id: Uuid, document_id: Uuid) -> Result<()> {
        let mut sessions = self.sessions.write();
        let session = sessions.get_mut(&id).ok_or(Error::SessionNotFound(id))?;

        let position = session
            .documents
            .iter()
            .position(|d| d.id == document_id)
            .ok_or(Error::DocumentNotFound(document_id))?;

        session.documents.remove(position);
        session.touch();
        Ok(())
    }

    /// List a session's attached documents in attachment order
    pub fn list_documents(&self, id: Uuid) -> Result<Vec<Arc<Document>>> {
        self.sessions
            .read()
            .get(&id)
            .map(|s| s.documents.clone())
            .ok_or(Error::SessionNotFound(id))
    }

    /// Reset a session's message history; attached documents are untouched
    pub fn clear_messages(&self, id: Uuid) -> Result<()> {
        let mut sessions = self.sessions.write();
        let session = sessions.get_mut(&id).ok_or(Error::SessionNotFound(id))?;

        session.messages.clear();
        session.touch();
        Ok(())
    }

    /// Delete a session entirely
    pub fn delete(&self, id: Uuid) -> Result<()> {
        self.sessions
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(Error::SessionNotFound(id))
    }

    /// Evict sessions idle longer than `idle`; returns the number removed
    ///
    /// A session is evicted when its last activity is strictly older than
    /// `now - idle`.
    pub fn cleanup_inactive(&self, idle: Duration) -> usize {
        let Ok(idle) = chrono::Duration::from_std(idle) else {
            return 0;
        };
        let Some(threshold) = Utc::now().checked_sub_signed(idle) else {
            return 0;
        };
        self.cleanup_older_than(threshold)
    }

    fn cleanup_older_than(&self, threshold: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, session| session.last_activity >= threshold);
        before - sessions.len()
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Whether the store has no sessions
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::extract::ExtractedText;

    fn doc(filename: &str) -> Arc<Document> {
        Arc::new(Document::from_extracted(
            filename.to_string(),
            ExtractedText {
                text: format!("contents of {filename}"),
                pages: 1,
            },
            2000,
        ))
    }

    #[test]
    fn create_then_get_round_trips() {
        let store = SessionStore::new();
        let session = store.create(doc("a.txt"));

        let fetched = store.get(session.id).unwrap();
        assert_eq!(fetched.id, session.id);
        assert_eq!(fetched.documents.len(), 1);
        assert!(fetched.messages.is_empty());
    }

    #[test]
    fn get_missing_session_is_not_found() {
        let store = SessionStore::new();
        let err = store.get(Uuid::new_v4()).unwrap_err();
        assert_eq!(err.code(), "SESSION_NOT_FOUND");
    }

    #[test]
    fn add_message_is_strictly_append_only() {
        let store = SessionStore::new();
        let session = store.create(doc("a.txt"));

        for i in 0..10 {
            store
                .add_message(session.id, Message::user(format!("message {i}")))
                .unwrap();
        }

        let fetched = store.get(session.id).unwrap();
        assert_eq!(fetched.messages.len(), 10);
        for (i, message) in fetched.messages.iter().enumerate() {
            assert_eq!(message.content, format!("message {i}"));
        }
    }

    #[test]
    fn add_message_refreshes_last_activity() {
        let store = SessionStore::new();
        let session = store.create(doc("a.txt"));
        let created = session.last_activity;

        std::thread::sleep(Duration::from_millis(5));
        store.add_message(session.id, Message::user("hi")).unwrap();

        let fetched = store.get(session.id).unwrap();
        assert!(fetched.last_activity > created);
    }

    #[test]
    fn duplicate_document_attachment_is_rejected() {
        let store = SessionStore::new();
        let shared = doc("a.txt");
        let session = store.create(Arc::clone(&shared));

        let err = store.add_document(session.id, shared).unwrap_err();
        assert_eq!(err.code(), "DOCUMENT_ALREADY_ATTACHED");
        assert_eq!(store.list_documents(session.id).unwrap().len(), 1);
    }

    #[test]
    fn remove_document_detaches_exactly_one() {
        let store = SessionStore::new();
        let first = doc("a.txt");
        let second = doc("b.txt");
        let session = store.create(Arc::clone(&first));
        store.add_document(session.id, Arc::clone(&second)).unwrap();

        store.remove_document(session.id, first.id).unwrap();

        let documents = store.list_documents(session.id).unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].id, second.id);

        let err = store.remove_document(session.id, first.id).unwrap_err();
        assert_eq!(err.code(), "DOCUMENT_NOT_FOUND");
    }

    #[test]
    fn clear_messages_leaves_documents_untouched() {
        let store = SessionStore::new();
        let session = store.create(doc("a.txt"));
        store.add_message(session.id, Message::user("one")).unwrap();
        store.add_message(session.id, Message::user("two")).unwrap();

        store.clear_messages(session.id).unwrap();

        let fetched = store.get(session.id).unwrap();
        assert!(fetched.messages.is_empty());
        assert_eq!(fetched.documents.len(), 1);
    }

    #[test]
    fn delete_removes_the_session() {
        let store = SessionStore::new();
        let session = store.create(doc("a.txt"));

        store.delete(session.id).unwrap();
        assert!(store.get(session.id).is_err());
        assert!(store.delete(session.id).is_err());
    }

    #[test]
    fn cleanup_evicts_strictly_older_sessions_only() {
        let store = SessionStore::new();
        let stale = store.create(doc("old.txt"));
        let fresh = store.create(doc("new.txt"));

        // Backdate the stale session past the threshold
        let threshold;
        {
            let mut sessions = store.sessions.write();
            let fresh_activity = sessions.get(&fresh.id).unwrap().last_activity;
            threshold = fresh_activity;
            sessions.get_mut(&stale.id).unwrap().last_activity =
                fresh_activity - chrono::Duration::seconds(10);
        }

        let removed = store.cleanup_older_than(threshold);
        assert_eq!(removed, 1);
        assert!(store.get(stale.id).is_err());
        // a session exactly at the threshold is kept
        assert!(store.get(fresh.id).is_ok());
    }

    #[test]
    fn concurrent_appends_keep_per_session_order() {
        let store = Arc::new(SessionStore::new());
        let first = store.create(doc("a.txt"));
        let second = store.create(doc("b.txt"));

        let handles: Vec<_> = [first.id, second.id]
            .into_iter()
            .map(|id| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        store.add_message(id, Message::user(format!("m{i}"))).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        for id in [first.id, second.id] {
            let session = store.get(id).unwrap();
            assert_eq!(session.messages.len(), 50);
            for (i, message) in session.messages.iter().enumerate() {
                assert_eq!(message.content, format!("m{i}"));
            }
        }
    }
}
