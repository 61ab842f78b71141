//! Answer-grounded heuristic
//!
//! A textual heuristic, not a structural guarantee: the answer is scanned for
//! a fixed set of refusal phrases. The phrase list is load-bearing for
//! behavioral compatibility; extending it changes which answers count as
//! grounded.

/// Phrases that mark an answer as not grounded in the context
const NOT_FOUND_PHRASES: [&str; 4] = [
    "cannot find",
    "not in the document",
    "not found",
    "not available",
];

/// Whether an answer appears grounded in the provided context
///
/// Case-insensitive scan; any refusal phrase marks the answer ungrounded.
pub fn is_grounded(answer: &str) -> bool {
    let lower = answer.to_lowercase();
    !NOT_FOUND_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refusal_phrase_marks_ungrounded() {
        assert!(!is_grounded(
            "I cannot find this information in the document."
        ));
        assert!(!is_grounded("That detail is NOT AVAILABLE here."));
        assert!(!is_grounded("The term was not found in the text."));
        assert!(!is_grounded("This is not in the document you provided."));
    }

    #[test]
    fn ordinary_answer_is_grounded() {
        assert!(is_grounded("The warranty period is two years."));
        assert!(is_grounded(""));
    }
}
