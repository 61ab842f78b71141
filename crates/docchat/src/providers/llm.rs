//! Answer provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait over interchangeable answer-generation backends
///
/// Implementations:
/// - `GroqProvider`: Groq chat-completions API
/// - `OpenAiProvider`: any OpenAI-compatible chat-completions endpoint
/// - `MockProvider`: deterministic offline stand-in
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Answer a question against the assembled context
    ///
    /// Returns the answer and whether it appears grounded in the context.
    /// `history` holds prior `User:`/`Assistant:` lines, excluding the
    /// current question.
    async fn answer_question(
        &self,
        context: &str,
        question: &str,
        history: &[String],
    ) -> Result<(String, bool)>;

    /// Summarize document text
    ///
    /// Returns the summary plus parsed key takeaways and main topics.
    async fn generate_summary(&self, text: &str) -> Result<(String, Vec<String>, Vec<String>)>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
