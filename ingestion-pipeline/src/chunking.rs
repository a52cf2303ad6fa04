use common::error::AppError;
use text_splitter::{ChunkConfig, TextSplitter};

/// Splits extracted text into fixed-size chunks with fixed overlap.
///
/// The overlap keeps semantic continuity across chunk boundaries. Sizes are
/// measured in characters. Empty input yields an empty sequence.
pub fn split_into_chunks(
    text: &str,
    chunk_size: usize,
    chunk_overlap: usize,
) -> Result<Vec<String>, AppError> {
    if chunk_size == 0 {
        return Err(AppError::Validation(
            "chunk_size must be greater than zero".into(),
        ));
    }

    if chunk_overlap >= chunk_size {
        return Err(AppError::Validation(format!(
            "chunk_size must be greater than the configured overlap of {chunk_overlap}"
        )));
    }

    let chunk_config = ChunkConfig::new(chunk_size)
        .with_overlap(chunk_overlap)
        .map_err(|e| AppError::Validation(format!("invalid chunk overlap: {e}")))?;
    let splitter = TextSplitter::new(chunk_config);

    Ok(splitter.chunks(text).map(str::to_owned).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_yields_no_chunks() {
        let chunks = split_into_chunks("", 1000, 200).expect("split");
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_short_text_is_a_single_chunk() {
        let chunks = split_into_chunks("Paris is the capital of France.", 1000, 200)
            .expect("split");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], "Paris is the capital of France.");
    }

    #[test]
    fn test_long_text_respects_size_and_overlaps() {
        let text = (0..200)
            .map(|i| format!("Sentence number {i} talks about course material."))
            .collect::<Vec<_>>()
            .join(" ");

        let chunks = split_into_chunks(&text, 1000, 200).expect("split");
        assert!(chunks.len() > 1, "long input should produce several chunks");
        assert!(chunks.iter().all(|c| c.chars().count() <= 1000));

        // Overlapping windows: each chunk opens with text carried over from
        // its predecessor.
        for window in chunks.windows(2) {
            let head: String = window[1].chars().take(40).collect();
            assert!(
                window[0].contains(head.trim()),
                "consecutive chunks should share overlapping text"
            );
        }
    }

    #[test]
    fn test_invalid_bounds_are_rejected() {
        assert!(matches!(
            split_into_chunks("text", 0, 0),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            split_into_chunks("text", 100, 100),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            split_into_chunks("text", 100, 150),
            Err(AppError::Validation(_))
        ));
    }
}
