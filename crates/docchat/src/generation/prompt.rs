//! Prompt templates for question answering and summarization

/// System prompt for question answering
pub const QUESTION_SYSTEM_PROMPT: &str = "You are a helpful assistant that answers questions \
     based ONLY on the provided document context. If the answer is not in the context, say \
     'I cannot find this information in the document.'";

/// System prompt for summarization
pub const SUMMARY_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that creates concise summaries in bullet point format.";

/// Number of prior history lines included in a question prompt
pub const HISTORY_LIMIT: usize = 4;

/// Build the question prompt from context, conversation history, and question
///
/// Only the most recent [`HISTORY_LIMIT`] history lines are included; the
/// current question is carried separately, never as part of the history.
pub fn build_question_prompt(context: &str, question: &str, history: &[String]) -> String {
    let mut prompt = String::new();

    prompt.push_str(context);
    prompt.push_str("\n\n");

    if !history.is_empty() {
        prompt.push_str("Previous conversation:\n");
        let start = history.len().saturating_sub(HISTORY_LIMIT);
        for line in &history[start..] {
            prompt.push_str("- ");
            prompt.push_str(line);
            prompt.push('\n');
        }
        prompt.push('\n');
    }

    prompt.push_str("Question: ");
    prompt.push_str(question);
    prompt.push_str("\n\n");
    prompt.push_str(
        "Answer the question based ONLY on the document context above. If the answer is not \
         in the context, respond with: 'I cannot find this information in the document.'",
    );

    prompt
}

/// Build the summarization prompt, truncating the input at `max_chars`
pub fn build_summary_prompt(text: &str, max_chars: usize) -> String {
    let text = if text.len() > max_chars {
        let mut end = max_chars;
        while end > 0 && !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &text[..end])
    } else {
        text.to_string()
    };

    format!(
        r#"Please provide a comprehensive summary of the following document in bullet point format.

Include:
1. Main topics and themes
2. Key takeaways
3. Important details

Document:
{text}

Format your response as:
- Summary: [brief overview]
- Key Takeaways:
  • [takeaway 1]
  • [takeaway 2]
- Main Topics:
  • [topic 1]
  • [topic 2]"#
    )
}
