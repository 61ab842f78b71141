//! Deterministic offline answer provider
//!
//! Used when no network provider is configured. Keyword overlap between the
//! question and the context decides whether the canned "found" or "not
//! found" answer is returned, so behavior is fully reproducible in tests and
//! offline development.

use async_trait::async_trait;

use crate::error::Result;

use super::llm::AiProvider;

/// Offline stand-in provider
pub struct MockProvider;

#[async_trait]
impl AiProvider for MockProvider {
    async fn answer_question(
        &self,
        context: &str,
        question: &str,
        _history: &[String],
    ) -> Result<(String, bool)> {
        let context_lower = context.to_lowercase();
        let question_lower = question.to_lowercase();

        let matches = question_lower
            .split_whitespace()
            .filter(|word| word.len() > 3 && context_lower.contains(*word))
            .count();

        if matches > 0 {
            let answer = format!(
                "Based on the document, {question}. The document mentions relevant information \
                 about this topic. [This is a mock response - connect to a real AI service for \
                 actual answers.]"
            );
            Ok((answer, true))
        } else {
            let answer = "I cannot find this information in the document. [Mock response - \
                          connect to a real AI service for actual answers.]"
                .to_string();
            Ok((answer, false))
        }
    }

    async fn generate_summary(&self, text: &str) -> Result<(String, Vec<String>, Vec<String>)> {
        let word_count = text.split_whitespace().count();

        let summary = format!(
            "Summary:\nThis document contains approximately {word_count} words covering various \
             topics.\n\nKey Takeaways:\n• This is a mock summary generated for \
             development/testing purposes\n• Connect to a real AI service for actual summaries\n\
             • The document appears to contain structured information\n\nMain Topics:\n\
             • Document Analysis\n• Information Extraction\n• Mock Data Processing"
        );

        let takeaways = vec![
            "This is a mock summary - connect to real AI for actual content".to_string(),
            "Document contains structured information".to_string(),
            format!("Approximately {word_count} words processed"),
        ];

        let topics = vec![
            "Document Analysis".to_string(),
            "Information Extraction".to_string(),
            "Mock Processing".to_string(),
        ];

        Ok((summary, takeaways, topics))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
