//! Answer-generation providers
//!
//! One trait over interchangeable backends. Selection is a static priority
//! chain evaluated once at startup from available configuration; it is never
//! re-evaluated per request and there is no mid-request failover.

pub mod groq;
pub mod llm;
pub mod mock;
pub mod openai;
mod wire;

use std::sync::Arc;

use crate::config::LlmConfig;
use crate::error::Result;

pub use groq::GroqProvider;
pub use llm::AiProvider;
pub use mock::MockProvider;
pub use openai::OpenAiProvider;

/// Select the answer provider for the life of the process
///
/// Priority: Groq when its key is configured, then the OpenAI-compatible
/// endpoint, then the deterministic offline mock.
pub fn select_provider(config: &LlmConfig) -> Result<Arc<dyn AiProvider>> {
    if config.groq.api_key.as_deref().is_some_and(|k| !k.is_empty()) {
        tracing::info!("using Groq answer provider (model {})", config.groq.model);
        return Ok(Arc::new(GroqProvider::new(&config.groq)?));
    }

    if config.openai.api_key.as_deref().is_some_and(|k| !k.is_empty()) {
        tracing::info!(
            "using OpenAI-compatible answer provider (model {})",
            config.openai.model
        );
        return Ok(Arc::new(OpenAiProvider::new(&config.openai)?));
    }

    tracing::warn!("no provider API key configured; answers come from the offline mock provider");
    Ok(Arc::new(MockProvider))
}
