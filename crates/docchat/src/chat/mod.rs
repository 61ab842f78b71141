//! The chat engine: question answering over session documents

pub mod stream;

use std::sync::Arc;
use std::time::Duration;

use futures::Stream;
use uuid::Uuid;

use crate::config::{RetrievalConfig, StreamingConfig};
use crate::error::{Error, Result};
use crate::persistence::PersistenceStore;
use crate::providers::AiProvider;
use crate::retrieval::{build_context, extract_citations, rank_chunks, raw_fallback};
use crate::types::document::{Chunk, Document};
use crate::types::response::{ChatResponse, StreamEvent, SummaryResponse};
use crate::types::session::{Message, Role, Session};
use crate::session::SessionStore;

/// Character cap on the chunk previews returned with an answer
const CHUNK_PREVIEW_LEN: usize = 200;

/// Retrieval-augmented chat over a session's documents
pub struct ChatEngine {
    sessions: Arc<SessionStore>,
    provider: Arc<dyn AiProvider>,
    persistence: Arc<dyn PersistenceStore>,
    retrieval: RetrievalConfig,
}

impl ChatEngine {
    /// Create a new engine
    pub fn new(
        sessions: Arc<SessionStore>,
        provider: Arc<dyn AiProvider>,
        persistence: Arc<dyn PersistenceStore>,
        retrieval: RetrievalConfig,
    ) -> Self {
        Self {
            sessions,
            provider,
            persistence,
            retrieval,
        }
    }

    /// The session store backing this engine
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Create a session around an extracted document
    pub async fn create_session(
        &self,
        document: Arc<Document>,
        user_id: Option<&str>,
    ) -> Session {
        let session = self.sessions.create(Arc::clone(&document));

        if let Some(user) = user_id {
            if let Err(e) = self.persistence.save_session(&session, user).await {
                tracing::warn!("failed to persist session {}: {e}", session.id);
            }
            if let Err(e) = self
                .persistence
                .save_document(session.id, &document, user)
                .await
            {
                tracing::warn!("failed to persist document {}: {e}", document.id);
            }
        }

        session
    }

    /// Answer a question grounded in the session's documents
    pub async fn ask_question(
        &self,
        session_id: Uuid,
        message: &str,
        user_id: Option<&str>,
    ) -> Result<ChatResponse> {
        let message = message.trim();
        if message.is_empty() {
            return Err(Error::Validation("message must not be empty".to_string()));
        }

        let session = self.sessions.get(session_id)?;

        // History is the conversation before this turn; the question itself
        // is carried separately.
        let history: Vec<String> = session
            .messages
            .iter()
            .map(|m| match m.role {
                Role::User => format!("User: {}", m.content),
                Role::Assistant => format!("Assistant: {}", m.content),
            })
            .collect();

        let user_message = self
            .sessions
            .add_message(session_id, Message::user(message))?;

        // Pool chunks from all attached documents, in attachment order
        let pooled: Vec<&Chunk> = session
            .documents
            .iter()
            .flat_map(|d| d.chunks.iter())
            .collect();

        let top_k = if session.documents.len() > 1 {
            self.retrieval.top_k_multi_doc
        } else {
            self.retrieval.top_k
        };

        let selected = rank_chunks(&pooled, message, top_k);
        let mut context = build_context(&selected);
        if context.is_empty() {
            context = raw_fallback(&session.documents, self.retrieval.raw_context_limit);
        }
        let citations = extract_citations(&selected);

        tracing::debug!(
            "question against session {session_id}: {} pooled chunks, {} selected",
            pooled.len(),
            selected.len()
        );

        let (answer, answer_found) = self
            .provider
            .answer_question(&context, message, &history)
            .await?;

        let assistant_message = Message::assistant(answer.clone(), Some(citations.clone()));
        if let Err(e) = self
            .sessions
            .add_message(session_id, assistant_message.clone())
        {
            tracing::warn!("failed to store assistant message: {e}");
        }

        if let Some(user) = user_id {
            for stored in [&user_message, &assistant_message] {
                if let Err(e) = self.persistence.save_message(session_id, stored, user).await {
                    tracing::warn!("failed to persist message {}: {e}", stored.id);
                }
            }
        }

        let relevant_chunks = selected
            .iter()
            .map(|chunk| preview(&chunk.text, CHUNK_PREVIEW_LEN))
            .collect();

        Ok(ChatResponse {
            response: answer,
            session_id,
            answer_found,
            relevant_chunks,
            citations,
        })
    }

    /// Answer a question and re-emit the answer as a paced event stream
    ///
    /// On failure before the first token, the stream is a single `Error`
    /// event.
    pub async fn stream_answer(
        &self,
        session_id: Uuid,
        message: &str,
        user_id: Option<&str>,
        streaming: &StreamingConfig,
    ) -> impl Stream<Item = StreamEvent> {
        use futures::StreamExt;

        let delay = Duration::from_millis(streaming.token_delay_ms);
        match self.ask_question(session_id, message, user_id).await {
            Ok(response) => {
                stream::stream_events(response, delay, streaming.words_per_token).boxed()
            }
            Err(error) => stream::error_stream(&error).boxed(),
        }
    }

    /// Ordered message history for a session
    pub fn get_history(&self, session_id: Uuid) -> Result<Session> {
        self.sessions.get(session_id)
    }

    /// Clear a session's messages, keeping its documents
    pub fn clear_session(&self, session_id: Uuid) -> Result<()> {
        self.sessions.clear_messages(session_id)
    }

    /// Delete a session entirely
    pub fn delete_session(&self, session_id: Uuid) -> Result<()> {
        self.sessions.delete(session_id)
    }

    /// Attach another document to a session
    pub async fn add_document(
        &self,
        session_id: Uuid,
        document: Arc<Document>,
        user_id: Option<&str>,
    ) -> Result<()> {
        self.sessions.add_document(session_id, Arc::clone(&document))?;

        if let Some(user) = user_id {
            if let Err(e) = self
                .persistence
                .save_document(session_id, &document, user)
                .await
            {
                tracing::warn!("failed to persist document {}: {e}", document.id);
            }
        }

        Ok(())
    }

    /// Detach a document from a session
    pub fn remove_document(&self, session_id: Uuid, document_id: Uuid) -> Result<()> {
        self.sessions.remove_document(session_id, document_id)
    }

    /// List a session's documents
    pub fn list_documents(&self, session_id: Uuid) -> Result<Vec<Arc<Document>>> {
        self.sessions.list_documents(session_id)
    }

    /// Summarize all documents attached to a session
    pub async fn generate_summary(&self, session_id: Uuid) -> Result<SummaryResponse> {
        let session = self.sessions.get(session_id)?;
        if session.documents.is_empty() {
            return Err(Error::Validation(
                "session has no documents to summarize".to_string(),
            ));
        }

        let text = session_text(&session);
        let (summary, key_takeaways, main_topics) = self.provider.generate_summary(&text).await?;

        Ok(SummaryResponse {
            summary,
            key_takeaways,
            main_topics,
        })
    }
}

/// Concatenate a session's document texts, with filename headers when pooled
fn session_text(session: &Session) -> String {
    if session.documents.len() == 1 {
        return session.documents[0].text.clone();
    }

    let mut text = String::new();
    for doc in &session.documents {
        text.push_str("--- ");
        text.push_str(&doc.filename);
        text.push_str(" ---\n");
        text.push_str(&doc.text);
        text.push_str("\n\n");
    }
    text
}

/// Bounded preview of a chunk text
fn preview(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::StreamExt;
    use parking_lot::Mutex;

    use crate::ingestion::extract::ExtractedText;
    use crate::persistence::NoopPersistence;
    use crate::providers::MockProvider;

    fn doc(filename: &str, text: &str) -> Arc<Document> {
        Arc::new(Document::from_extracted(
            filename.to_string(),
            ExtractedText {
                text: text.to_string(),
                pages: 1,
            },
            2000,
        ))
    }

    fn engine() -> ChatEngine {
        ChatEngine::new(
            Arc::new(SessionStore::new()),
            Arc::new(MockProvider),
            Arc::new(NoopPersistence),
            RetrievalConfig::default(),
        )
    }

    /// Provider that records every prompt it receives
    struct RecordingProvider {
        calls: Mutex<Vec<(String, String, Vec<String>)>>,
    }

    impl RecordingProvider {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AiProvider for RecordingProvider {
        async fn answer_question(
            &self,
            context: &str,
            question: &str,
            history: &[String],
        ) -> crate::error::Result<(String, bool)> {
            self.calls.lock().push((
                context.to_string(),
                question.to_string(),
                history.to_vec(),
            ));
            Ok(("The answer.".to_string(), true))
        }

        async fn generate_summary(
            &self,
            _text: &str,
        ) -> crate::error::Result<(String, Vec<String>, Vec<String>)> {
            Ok(("summary".to_string(), vec![], vec![]))
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    #[tokio::test]
    async fn ask_question_answers_with_citations_and_previews() {
        let engine = engine();
        let session = engine
            .create_session(doc("pets.txt", "Cats are mammals. Dogs are mammals too."), None)
            .await;

        let response = engine
            .ask_question(session.id, "Are dogs mammals?", None)
            .await
            .unwrap();

        assert!(response.answer_found);
        assert_eq!(response.session_id, session.id);
        assert_eq!(response.relevant_chunks.len(), 1);
        assert_eq!(response.citations.len(), 1);
        assert_eq!(response.citations[0].page, 1);

        let stored = engine.get_history(session.id).unwrap();
        assert_eq!(stored.messages.len(), 2);
        assert_eq!(stored.messages[0].role, Role::User);
        assert_eq!(stored.messages[1].role, Role::Assistant);
        assert!(stored.messages[1].citations.is_some());
    }

    #[tokio::test]
    async fn empty_message_is_rejected_before_reaching_the_store() {
        let engine = engine();
        let session = engine.create_session(doc("a.txt", "text"), None).await;

        let err = engine.ask_question(session.id, "   ", None).await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        // nothing was appended
        assert!(engine.get_history(session.id).unwrap().messages.is_empty());
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let engine = engine();
        let err = engine
            .ask_question(Uuid::new_v4(), "hello?", None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "SESSION_NOT_FOUND");
    }

    #[tokio::test]
    async fn history_excludes_the_current_question() {
        let provider = Arc::new(RecordingProvider::new());
        let engine = ChatEngine::new(
            Arc::new(SessionStore::new()),
            Arc::clone(&provider) as Arc<dyn AiProvider>,
            Arc::new(NoopPersistence),
            RetrievalConfig::default(),
        );
        let session = engine
            .create_session(doc("a.txt", "dogs are mammals"), None)
            .await;

        engine.ask_question(session.id, "first question", None).await.unwrap();
        engine.ask_question(session.id, "second question", None).await.unwrap();

        let calls = provider.calls.lock();
        assert_eq!(calls.len(), 2);

        // first turn starts with no history
        assert!(calls[0].2.is_empty());

        // second turn sees the first exchange only
        let history = &calls[1].2;
        assert_eq!(
            history,
            &vec![
                "User: first question".to_string(),
                "Assistant: The answer.".to_string(),
            ]
        );
        assert!(!history.iter().any(|line| line.contains("second question")));

        // context carries labeled chunks
        assert!(calls[1].0.contains("[Chunk 1 - Page 1]"));
    }

    #[tokio::test]
    async fn multi_document_sessions_widen_the_selection() {
        let engine = engine();
        let text = "dogs are mammals and dogs run fast ".repeat(400);
        let session = engine.create_session(doc("a.txt", &text), None).await;
        engine
            .add_document(session.id, doc("b.txt", &text), None)
            .await
            .unwrap();

        let response = engine
            .ask_question(session.id, "do dogs run fast?", None)
            .await
            .unwrap();

        // both documents contribute well past the single-document top-k
        assert!(response.relevant_chunks.len() > 5);
        assert!(response.relevant_chunks.len() <= 20);
    }

    #[tokio::test]
    async fn summary_requires_attached_documents() {
        let engine = engine();
        let document = doc("a.txt", "one two three four");
        let session = engine.create_session(Arc::clone(&document), None).await;

        let summary = engine.generate_summary(session.id).await.unwrap();
        assert!(summary.summary.contains("approximately 4 words"));
        assert_eq!(summary.key_takeaways.len(), 3);

        engine.remove_document(session.id, document.id).unwrap();
        let err = engine.generate_summary(session.id).await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn clear_session_keeps_documents() {
        let engine = engine();
        let session = engine
            .create_session(doc("a.txt", "dogs are mammals"), None)
            .await;
        engine.ask_question(session.id, "are dogs mammals?", None).await.unwrap();

        engine.clear_session(session.id).unwrap();

        let cleared = engine.get_history(session.id).unwrap();
        assert!(cleared.messages.is_empty());
        assert_eq!(cleared.documents.len(), 1);
    }

    #[tokio::test]
    async fn stream_answer_ends_with_done() {
        let engine = engine();
        let session = engine
            .create_session(doc("a.txt", "dogs are mammals"), None)
            .await;

        let streaming = StreamingConfig {
            token_delay_ms: 0,
            words_per_token: 3,
        };
        let events: Vec<StreamEvent> = engine
            .stream_answer(session.id, "are dogs mammals?", None, &streaming)
            .await
            .collect()
            .await;

        assert!(events.len() > 1);
        let (terminal, tokens) = events.split_last().unwrap();
        assert!(matches!(terminal, StreamEvent::Done { .. }));
        assert!(tokens.iter().all(|e| matches!(e, StreamEvent::Token { .. })));
    }

    #[tokio::test]
    async fn stream_answer_failure_is_a_single_error_event() {
        let engine = engine();
        let streaming = StreamingConfig::default();

        let events: Vec<StreamEvent> = engine
            .stream_answer(Uuid::new_v4(), "hello?", None, &streaming)
            .await
            .collect()
            .await;

        assert_eq!(events.len(), 1);
        match &events[0] {
            StreamEvent::Error { code, .. } => assert_eq!(code, "SESSION_NOT_FOUND"),
            other => panic!("expected error event, got {other:?}"),
        }
    }
}
