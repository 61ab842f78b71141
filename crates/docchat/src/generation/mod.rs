//! Prompt construction, grounding heuristic, and summary parsing

pub mod grounding;
pub mod prompt;
pub mod summary;

pub use grounding::is_grounded;
pub use prompt::{build_question_prompt, build_summary_prompt};
pub use summary::{extract_takeaways, extract_topics};
