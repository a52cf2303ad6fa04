use std::cmp::Ordering;

use common::storage::types::text_chunk::TextChunk;

/// A chunk paired with its similarity to the query embedding.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: TextChunk,
    pub score: f32,
}

/// Cosine similarity between two vectors; 0.0 for mismatched or degenerate
/// input rather than NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a <= 0.0 || norm_b <= 0.0 {
        return 0.0;
    }

    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    if similarity.is_finite() {
        similarity
    } else {
        0.0
    }
}

/// Descending score order with id tie-break so equal scores stay stable.
pub fn sort_by_score_desc(items: &mut [ScoredChunk]) {
    items.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.chunk.id.cmp(&b.chunk.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk_with(id: &str, score: f32) -> ScoredChunk {
        let mut chunk = TextChunk::new("src".into(), 0, "body".into(), vec![1.0]);
        chunk.id = id.to_owned();
        ScoredChunk { chunk, score }
    }

    #[test]
    fn test_cosine_similarity_basic_geometry() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_degenerate_input() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_sort_by_score_desc_with_tie_break() {
        let mut items = vec![
            chunk_with("b", 0.5),
            chunk_with("a", 0.5),
            chunk_with("c", 0.9),
        ];
        sort_by_score_desc(&mut items);

        let ids: Vec<&str> = items.iter().map(|s| s.chunk.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }
}
