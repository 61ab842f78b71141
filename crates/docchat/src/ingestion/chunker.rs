//! Greedy word-aligned text chunking

/// Split text into chunks of at most `max_chunk_size` characters
///
/// Text no longer than the limit is returned as a single chunk with its
/// original whitespace preserved. Longer text is split into
/// whitespace-delimited words which are greedily packed into chunks joined by
/// single spaces. A single word longer than the limit is emitted as its own
/// oversized chunk rather than truncated.
pub fn chunk_text(text: &str, max_chunk_size: usize) -> Vec<String> {
    if text.len() <= max_chunk_size {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        // +1 for the joining space
        if !current.is_empty() && current.len() + word.len() + 1 > max_chunk_size {
            chunks.push(std::mem::take(&mut current));
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
