//! OpenAI-compatible answer provider
//!
//! Works against any endpoint that speaks the chat-completions format; the
//! endpoint URL, model, and key come from configuration.

use async_trait::async_trait;
use std::time::Duration;

use crate::config::OpenAiConfig;
use crate::error::{Error, Result};
use crate::generation::{
    build_question_prompt, build_summary_prompt, extract_takeaways, extract_topics, is_grounded,
    prompt::{QUESTION_SYSTEM_PROMPT, SUMMARY_SYSTEM_PROMPT},
};

use super::llm::AiProvider;
use super::wire::{ChatCompletionRequest, ChatCompletionResponse, WireMessage};

/// Hard ceiling on document characters sent for summarization
const MAX_SUMMARY_CHARS: usize = 8_000;

/// OpenAI-style chat-completions provider
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenAiProvider {
    /// Create a new provider from configuration
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        })
    }

    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String> {
        let mut builder = self.client.post(&self.base_url).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!(
                "API error (status {status}): {body}"
            )));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("failed to parse response: {e}")))?;
        parsed.into_content()
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    async fn answer_question(
        &self,
        context: &str,
        question: &str,
        history: &[String],
    ) -> Result<(String, bool)> {
        let prompt = build_question_prompt(context, question, history);
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                WireMessage::system(QUESTION_SYSTEM_PROMPT),
                WireMessage::user(prompt),
            ],
            max_tokens: None,
            temperature: None,
            stream: false,
        };

        let answer = self.complete(&request).await?;
        let grounded = is_grounded(&answer);
        Ok((answer, grounded))
    }

    async fn generate_summary(&self, text: &str) -> Result<(String, Vec<String>, Vec<String>)> {
        let prompt = build_summary_prompt(text, MAX_SUMMARY_CHARS);
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                WireMessage::system(SUMMARY_SYSTEM_PROMPT),
                WireMessage::user(prompt),
            ],
            max_tokens: None,
            temperature: None,
            stream: false,
        };

        let summary = self.complete(&request).await?;
        let takeaways = extract_takeaways(&summary);
        let topics = extract_topics(&summary);
        Ok((summary, takeaways, topics))
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
