use common::{
    error::AppError,
    storage::{
        store::StorageManager,
        types::{text_chunk::TextChunk, StoredObject},
    },
};
use tracing::debug;

use crate::scoring::{cosine_similarity, sort_by_score_desc, ScoredChunk};

/// Persistent per-namespace vector index over the whole-document store.
///
/// Each namespace owns one JSON document holding all of its chunk records.
/// Appends are read-extend-rewrite; re-ingesting the same source duplicates
/// its chunks. Concurrent appends against the same namespace race with
/// last-writer-wins, matching the store's semantics.
#[derive(Clone)]
pub struct VectorIndex {
    storage: StorageManager,
}

impl VectorIndex {
    pub fn new(storage: StorageManager) -> Self {
        Self { storage }
    }

    fn location(namespace: &str) -> String {
        format!("{}/{namespace}.json", TextChunk::collection())
    }

    pub async fn load(&self, namespace: &str) -> Result<Vec<TextChunk>, AppError> {
        Ok(self
            .storage
            .get_json(&Self::location(namespace))
            .await?
            .unwrap_or_default())
    }

    /// Appends records to the namespace's index and returns the new total.
    pub async fn append(
        &self,
        namespace: &str,
        records: Vec<TextChunk>,
    ) -> Result<usize, AppError> {
        let mut chunks = self.load(namespace).await?;
        chunks.extend(records);
        self.storage
            .put_json(&Self::location(namespace), &chunks)
            .await?;
        Ok(chunks.len())
    }

    pub async fn count(&self, namespace: &str) -> Result<usize, AppError> {
        Ok(self.load(namespace).await?.len())
    }

    /// Top-k chunks by cosine similarity to the query embedding, best first.
    pub async fn search(
        &self,
        namespace: &str,
        query_embedding: &[f32],
        k: usize,
    ) -> Result<Vec<ScoredChunk>, AppError> {
        let chunks = self.load(namespace).await?;
        let candidates = chunks.len();

        let mut scored: Vec<ScoredChunk> = chunks
            .into_iter()
            .map(|chunk| {
                let score = cosine_similarity(query_embedding, &chunk.embedding);
                ScoredChunk { chunk, score }
            })
            .collect();

        sort_by_score_desc(&mut scored);
        scored.truncate(k);

        debug!(
            namespace,
            candidates,
            returned = scored.len(),
            top_score = scored.first().map(|hit| f64::from(hit.score)),
            "vector index search"
        );

        Ok(scored)
    }
}
