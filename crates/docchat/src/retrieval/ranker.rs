//! Keyword-overlap relevance ranking
//!
//! Deliberately lexical: each chunk is scored by how many query words it
//! contains, with a bonus for an exact phrase match. No embeddings involved.

use crate::types::document::Chunk;

/// Flat score bonus when the whole query appears verbatim in a chunk
const PHRASE_BONUS: i64 = 5;

/// Rank chunks against a query and return the top `top_k` matches
///
/// Scoring lowercases both sides; a chunk earns one point per query word it
/// contains as a substring, plus [`PHRASE_BONUS`] if the entire query occurs
/// contiguously. The sort is stable, so equal scores keep their pooled order,
/// and the result is deterministic for identical inputs.
///
/// If no chunk scores above zero, the first `min(top_k, len)` chunks are
/// returned in pooled order so that callers always get a non-empty context
/// for a non-empty pool.
pub fn rank_chunks<'a>(chunks: &[&'a Chunk], query: &str, top_k: usize) -> Vec<&'a Chunk> {
    if chunks.is_empty() {
        return Vec::new();
    }

    let query_lower = query.to_lowercase();
    let query_words: Vec<&str> = query_lower.split_whitespace().collect();

    let mut scored: Vec<(&'a Chunk, i64)> = chunks
        .iter()
        .map(|chunk| {
            let chunk_lower = chunk.text.to_lowercase();
            let mut score = query_words
                .iter()
                .filter(|word| chunk_lower.contains(**word))
                .count() as i64;

            if chunk_lower.contains(&query_lower) {
                score += PHRASE_BONUS;
            }

            (*chunk, score)
        })
        .collect();

    // Stable sort: ties keep original pooled order
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    let relevant: Vec<&'a Chunk> = scored
        .iter()
        .filter(|(_, score)| *score > 0)
        .take(top_k)
        .map(|(chunk, _)| *chunk)
        .collect();

    if relevant.is_empty() {
        return chunks.iter().take(top_k).copied().collect();
    }

    relevant
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str, index: u32) -> Chunk {
        Chunk::new(text.to_string(), index, 1)
    }

    #[test]
    fn matching_chunk_is_selected() {
        let only = chunk("Cats are mammals. Dogs are mammals too.", 0);
        let pool = vec![&only];

        let ranked = rank_chunks(&pool, "Are dogs mammals?", 5);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, only.id);
    }

    #[test]
    fn higher_overlap_ranks_first() {
        let weak = chunk("dogs sleep a lot", 0);
        let strong = chunk("dogs are loyal and dogs are mammals", 1);
        let none = chunk("the sky is blue", 2);
        let pool = vec![&weak, &strong, &none];

        let ranked = rank_chunks(&pool, "are dogs mammals", 3);
        assert_eq!(ranked[0].id, strong.id);
        assert_eq!(ranked[1].id, weak.id);
        // zero-scoring chunk is excluded when any chunk matches
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn phrase_match_outranks_scattered_words() {
        let scattered = chunk("warranty is covered, and the period is long", 0);
        let exact = chunk("the warranty period is two years", 1);
        let pool = vec![&scattered, &exact];

        let ranked = rank_chunks(&pool, "warranty period", 2);
        assert_eq!(ranked[0].id, exact.id);
    }

    #[test]
    fn ties_keep_pooled_order() {
        let first = chunk("dogs bark", 0);
        let second = chunk("dogs run", 1);
        let third = chunk("dogs dig", 2);
        let pool = vec![&first, &second, &third];

        let ranked = rank_chunks(&pool, "dogs", 3);
        let ids: Vec<_> = ranked.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![first.id, second.id, third.id]);
    }

    #[test]
    fn no_overlap_falls_back_to_pooled_order() {
        let a = chunk("alpha", 0);
        let b = chunk("beta", 1);
        let c = chunk("gamma", 2);
        let pool = vec![&a, &b, &c];

        let ranked = rank_chunks(&pool, "zzz qqq", 3);
        let ids: Vec<_> = ranked.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
    }

    #[test]
    fn fallback_respects_top_k() {
        let a = chunk("alpha", 0);
        let b = chunk("beta", 1);
        let c = chunk("gamma", 2);
        let pool = vec![&a, &b, &c];

        let ranked = rank_chunks(&pool, "zzz", 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].id, a.id);
    }

    #[test]
    fn ranking_is_deterministic() {
        let chunks: Vec<Chunk> = (0..20)
            .map(|i| chunk(&format!("chunk {} mentions dogs sometimes", i), i))
            .collect();
        let pool: Vec<&Chunk> = chunks.iter().collect();

        let first: Vec<_> = rank_chunks(&pool, "dogs sometimes", 5)
            .iter()
            .map(|c| c.id)
            .collect();
        let second: Vec<_> = rank_chunks(&pool, "dogs sometimes", 5)
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_pool_yields_empty_result() {
        let ranked = rank_chunks(&[], "anything", 5);
        assert!(ranked.is_empty());
    }
}
