//! Configuration for the chat engine and server

use serde::{Deserialize, Serialize};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// Answer-generation provider configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Session lifecycle configuration
    #[serde(default)]
    pub session: SessionConfig,
    /// Streaming configuration
    #[serde(default)]
    pub streaming: StreamingConfig,
}

impl ChatConfig {
    /// Build a configuration from defaults plus environment overrides
    ///
    /// Recognized variables: `PORT`, `GROQ_API_KEY`, `GROQ_MODEL`,
    /// `OPENAI_API_KEY`, `OPENAI_API_URL`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                config.server.port = port;
            }
        }
        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            if !key.is_empty() {
                config.llm.groq.api_key = Some(key);
            }
        }
        if let Ok(model) = std::env::var("GROQ_MODEL") {
            if !model.is_empty() {
                config.llm.groq.model = model;
            }
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                config.llm.openai.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var("OPENAI_API_URL") {
            if !url.is_empty() {
                config.llm.openai.base_url = url;
            }
        }

        config
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
            max_body_size: 25 * 1024 * 1024, // 25MB of extracted text
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum chunk size in characters
    pub max_chunk_size: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: 2000,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Chunks selected for a single-document session
    pub top_k: usize,
    /// Chunks selected when the session pools multiple documents
    pub top_k_multi_doc: usize,
    /// Character ceiling for the raw-text context fallback
    pub raw_context_limit: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            top_k_multi_doc: 20,
            raw_context_limit: 15_000,
        }
    }
}

/// Answer-generation provider configuration
///
/// Provider selection is a static priority chain evaluated once at startup:
/// Groq if a key is present, otherwise the OpenAI-compatible endpoint if a
/// key is present, otherwise the offline mock.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Groq provider settings
    #[serde(default)]
    pub groq: GroqConfig,
    /// OpenAI-compatible provider settings
    #[serde(default)]
    pub openai: OpenAiConfig,
}

/// Groq provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    /// API key; provider is eligible only when set
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Generation model
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.3-70b-versatile".to_string(), // 128K context window
            timeout_secs: 60,
        }
    }
}

/// OpenAI-compatible provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key; provider is eligible only when set
    pub api_key: Option<String>,
    /// Full chat-completions endpoint URL
    pub base_url: String,
    /// Generation model
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Session lifecycle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Sessions idle longer than this are evicted
    pub idle_timeout_secs: u64,
    /// Period of the background inactivity sweep
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 3600,
            sweep_interval_secs: 3600,
        }
    }
}

/// Streaming configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingConfig {
    /// Delay between token events in milliseconds
    pub token_delay_ms: u64,
    /// Words grouped into one token event
    pub words_per_token: usize,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            token_delay_ms: 20,
            words_per_token: 3,
        }
    }
}
