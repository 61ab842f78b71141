//! Application state for the chat server

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::chat::ChatEngine;
use crate::config::ChatConfig;
use crate::error::Result;
use crate::ingestion::extract::{PlainTextExtractor, TextExtractor};
use crate::persistence::NoopPersistence;
use crate::providers::select_provider;
use crate::session::{spawn_sweeper, SessionStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: ChatConfig,
    /// The chat engine owning sessions and the answer provider
    engine: ChatEngine,
    /// Text extractor for uploads
    extractor: Arc<dyn TextExtractor>,
    /// Inactivity sweeper, aborted when the state is dropped
    sweeper: JoinHandle<()>,
}

impl AppState {
    /// Create the application state and start the background sweeper
    ///
    /// The answer provider is selected here, once, for the process lifetime.
    /// Must be called from within a tokio runtime.
    pub fn new(config: ChatConfig) -> Result<Self> {
        let provider = select_provider(&config.llm)?;
        tracing::info!("answer provider: {}", provider.name());

        let sessions = Arc::new(SessionStore::new());
        let sweeper = spawn_sweeper(
            Arc::clone(&sessions),
            Duration::from_secs(config.session.sweep_interval_secs),
            Duration::from_secs(config.session.idle_timeout_secs),
        );
        tracing::info!(
            "session sweeper started (period {}s, idle timeout {}s)",
            config.session.sweep_interval_secs,
            config.session.idle_timeout_secs
        );

        let engine = ChatEngine::new(
            sessions,
            provider,
            Arc::new(NoopPersistence),
            config.retrieval.clone(),
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                engine,
                extractor: Arc::new(PlainTextExtractor),
                sweeper,
            }),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &ChatConfig {
        &self.inner.config
    }

    /// Get the chat engine
    pub fn engine(&self) -> &ChatEngine {
        &self.inner.engine
    }

    /// Get the text extractor
    pub fn extractor(&self) -> &Arc<dyn TextExtractor> {
        &self.inner.extractor
    }
}

impl Drop for AppStateInner {
    fn drop(&mut self) {
        self.sweeper.abort();
    }
}
