//! Context assembly and citation extraction

use std::collections::HashSet;
use std::sync::Arc;

use crate::types::document::{Chunk, Document};
use crate::types::response::Citation;

/// Header prefixed to every assembled context
const CONTEXT_HEADER: &str = "Document Context:\n\n";

/// Maximum citation preview length in bytes
const PREVIEW_LEN: usize = 100;

/// Render selected chunks into the single context string passed to generation
///
/// Returns an empty string for an empty selection; callers then use
/// [`raw_fallback`] instead.
pub fn build_context(chunks: &[&Chunk]) -> String {
    if chunks.is_empty() {
        return String::new();
    }

    let mut context = String::from(CONTEXT_HEADER);
    for (i, chunk) in chunks.iter().enumerate() {
        let page = chunk.page_number.max(1);
        context.push_str(&format!("[Chunk {} - Page {}]\n", i + 1, page));
        context.push_str(&chunk.text);
        context.push_str("\n\n");
    }

    context
}

/// Raw-text context fallback when ranking selected nothing
///
/// Concatenates every attached document's full text (filename headers when
/// there is more than one), hard-truncated at `max_chars` with a marker.
pub fn raw_fallback(documents: &[Arc<Document>], max_chars: usize) -> String {
    let mut full_text = String::new();
    if documents.len() == 1 {
        full_text.push_str(&documents[0].text);
    } else {
        for doc in documents {
            full_text.push_str("--- ");
            full_text.push_str(&doc.filename);
            full_text.push_str(" ---\n");
            full_text.push_str(&doc.text);
            full_text.push_str("\n\n");
        }
    }

    if full_text.len() > max_chars {
        let mut truncated = truncate_at_boundary(&full_text, max_chars).to_string();
        truncated.push_str("\n... [truncated]");
        full_text = truncated;
    }

    format!("{CONTEXT_HEADER}{full_text}")
}

/// Derive deduplicated page citations from the chunks used to answer
///
/// One citation per page, first occurrence wins, in first-seen order.
pub fn extract_citations(chunks: &[&Chunk]) -> Vec<Citation> {
    let mut seen = HashSet::new();
    let mut citations = Vec::new();

    for chunk in chunks {
        let page = chunk.page_number.max(1);
        if !seen.insert(page) {
            continue;
        }

        let text = if chunk.text.len() > PREVIEW_LEN {
            format!("{}...", truncate_at_boundary(&chunk.text, PREVIEW_LEN))
        } else {
            chunk.text.clone()
        };

        citations.push(Citation { page, text });
    }

    citations
}

/// Cut at `max` bytes, backing up to a valid UTF-8 character boundary
fn truncate_at_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
