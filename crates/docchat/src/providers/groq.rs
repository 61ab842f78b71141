//! Groq answer provider
//!
//! Talks to Groq's OpenAI-compatible chat-completions API. The large context
//! window lets most contexts through whole; a hard character ceiling guards
//! against degenerate inputs.

use async_trait::async_trait;
use std::time::Duration;

use crate::config::GroqConfig;
use crate::error::{Error, Result};
use crate::generation::{
    build_question_prompt, build_summary_prompt, extract_takeaways, extract_topics, is_grounded,
    prompt::{QUESTION_SYSTEM_PROMPT, SUMMARY_SYSTEM_PROMPT},
};

use super::llm::AiProvider;
use super::wire::{ChatCompletionRequest, ChatCompletionResponse, WireMessage};

/// Hard ceiling on context characters sent per question
const MAX_CONTEXT_CHARS: usize = 100_000;

/// Hard ceiling on document characters sent for summarization
const MAX_SUMMARY_CHARS: usize = 12_000;

/// Groq chat-completions provider
pub struct GroqProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GroqProvider {
    /// Create a new Groq provider from configuration
    pub fn new(config: &GroqConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone().unwrap_or_default(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        })
    }

    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!(
                "Groq API error (status {status}): {body}"
            )));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("failed to parse Groq response: {e}")))?;
        parsed.into_content()
    }
}

#[async_trait]
impl AiProvider for GroqProvider {
    async fn answer_question(
        &self,
        context: &str,
        question: &str,
        history: &[String],
    ) -> Result<(String, bool)> {
        let context = if context.len() > MAX_CONTEXT_CHARS {
            let mut end = MAX_CONTEXT_CHARS;
            while end > 0 && !context.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}\n... [content truncated due to length]", &context[..end])
        } else {
            context.to_string()
        };

        let prompt = build_question_prompt(&context, question, history);
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                WireMessage::system(QUESTION_SYSTEM_PROMPT),
                WireMessage::user(prompt),
            ],
            max_tokens: Some(1000),
            temperature: Some(0.7),
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
            max_tokens: Some(500),
            temperature: Some(0.5),
            stream: false,
        };

        let summary = self.complete(&request).await?.trim().to_string();
        let takeaways = extract_takeaways(&summary);
        let topics = extract_topics(&summary);
        Ok((summary, takeaways, topics))
    }

    fn name(&self) -> &'static str {
        "groq"
    }
}
