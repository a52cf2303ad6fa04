use std::sync::Arc;

use async_trait::async_trait;
use common::{
    error::AppError,
    storage::{
        store::StorageManager,
        types::{raw_corpus::RawCorpus, text_chunk::TextChunk},
    },
    utils::{
        config::{AppConfig, IngestMode},
        embedding::EmbeddingProvider,
    },
};
use retrieval_pipeline::VectorIndex;
use tracing::info;

use crate::{
    chunking::split_into_chunks,
    extraction::TextExtractor,
    governor::{submit_paced, ChunkSink, GovernorSettings, PendingChunk},
};

/// Counts reported back to the uploader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub pages: usize,
    pub segments: usize,
}

/// Turns an uploaded document into a caller's corpus.
///
/// Mode `Raw` keeps the whole extracted text as one context block and
/// replaces any prior content; mode `Indexed` chunks, embeds under the rate
/// governor and appends to the caller's vector index.
pub struct DocumentIngestor {
    extractor: Arc<dyn TextExtractor>,
    embedder: Arc<EmbeddingProvider>,
    index: VectorIndex,
    storage: StorageManager,
    mode: IngestMode,
    chunk_size: usize,
    chunk_overlap: usize,
    governor: GovernorSettings,
}

impl DocumentIngestor {
    pub fn new(
        config: &AppConfig,
        storage: StorageManager,
        extractor: Arc<dyn TextExtractor>,
        embedder: Arc<EmbeddingProvider>,
        index: VectorIndex,
    ) -> Self {
        Self {
            extractor,
            embedder,
            index,
            storage,
            mode: config.ingest_mode.clone(),
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
            governor: GovernorSettings::from_config(config),
        }
    }

    pub async fn ingest(
        &self,
        bytes: Vec<u8>,
        namespace: &str,
        source_name: &str,
    ) -> Result<IngestReport, AppError> {
        let document = self.extractor.extract(bytes).await?;
        let pages = document.pages;

        match self.mode {
            IngestMode::Raw => {
                RawCorpus::new(document.text, pages, source_name.to_owned())
                    .replace(namespace, &self.storage)
                    .await?;
                info!(namespace, pages, source_name, "replaced raw corpus");
                Ok(IngestReport { pages, segments: 0 })
            }
            IngestMode::Indexed => {
                let chunks =
                    split_into_chunks(&document.text, self.chunk_size, self.chunk_overlap)?;
                let pending: Vec<PendingChunk> = chunks
                    .into_iter()
                    .enumerate()
                    .map(|(seq, text)| PendingChunk {
                        source_id: source_name.to_owned(),
                        seq,
                        text,
                    })
                    .collect();

                let sink = EmbedAndIndexSink {
                    embedder: &self.embedder,
                    index: &self.index,
                };
                let segments = submit_paced(&sink, namespace, &pending, self.governor)
                    .await
                    .map_err(|err| AppError::Processing(err.to_string()))?;

                info!(namespace, pages, segments, source_name, "indexed document");
                Ok(IngestReport { pages, segments })
            }
        }
    }
}

/// Embeds each paced batch and appends the records to the namespace index.
struct EmbedAndIndexSink<'a> {
    embedder: &'a EmbeddingProvider,
    index: &'a VectorIndex,
}

#[async_trait]
impl ChunkSink for EmbedAndIndexSink<'_> {
    async fn submit(&self, namespace: &str, batch: &[PendingChunk]) -> Result<(), AppError> {
        let texts: Vec<String> = batch.iter().map(|chunk| chunk.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(texts).await?;

        if embeddings.len() != batch.len() {
            return Err(AppError::Processing(format!(
                "embedder returned {} vectors for a batch of {}",
                embeddings.len(),
                batch.len()
            )));
        }

        let records: Vec<TextChunk> = batch
            .iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| {
                TextChunk::new(chunk.source_id.clone(), chunk.seq, chunk.text.clone(), embedding)
            })
            .collect();

        self.index.append(namespace, records).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::storage::store::testing::memory_storage;
    use common::utils::config::StorageKind;

    use crate::extraction::testing::{RejectingExtractor, StaticTextExtractor};

    fn test_config(mode: IngestMode) -> AppConfig {
        AppConfig {
            storage: StorageKind::Memory,
            ingest_mode: mode,
            chunk_size: 100,
            chunk_overlap: 20,
            ..AppConfig::default()
        }
    }

    async fn ingestor_with(
        mode: IngestMode,
        extractor: Arc<dyn TextExtractor>,
    ) -> (DocumentIngestor, StorageManager, VectorIndex) {
        let storage = memory_storage().await;
        let index = VectorIndex::new(storage.clone());
        let embedder = Arc::new(EmbeddingProvider::new_hashed(32).expect("hashed provider"));
        let ingestor = DocumentIngestor::new(
            &test_config(mode),
            storage.clone(),
            extractor,
            embedder,
            index.clone(),
        );
        (ingestor, storage, index)
    }

    #[tokio::test]
    async fn test_raw_mode_replaces_prior_corpus() {
        let (ingestor, storage, _) = ingestor_with(
            IngestMode::Raw,
            Arc::new(StaticTextExtractor::new("Paris is the capital of France.", 3)),
        )
        .await;

        let report = ingestor
            .ingest(b"pdf-bytes".to_vec(), "ns", "geo.pdf")
            .await
            .expect("ingest");
        assert_eq!(report, IngestReport { pages: 3, segments: 0 });

        let corpus = RawCorpus::find("ns", &storage)
            .await
            .expect("load corpus")
            .expect("corpus present");
        assert_eq!(corpus.text, "Paris is the capital of France.");
        assert_eq!(corpus.pages, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_indexed_mode_appends_and_duplicates_on_reingest() {
        let long_text = (0..40)
            .map(|i| format!("Fact {i} about the course."))
            .collect::<Vec<_>>()
            .join(" ");
        let (ingestor, _, index) = ingestor_with(
            IngestMode::Indexed,
            Arc::new(StaticTextExtractor::new(&long_text, 2)),
        )
        .await;

        let report = ingestor
            .ingest(b"pdf-bytes".to_vec(), "ns", "notes.pdf")
            .await
            .expect("ingest");
        assert!(report.segments > 1);
        assert_eq!(report.pages, 2);
        assert_eq!(index.count("ns").await.expect("count"), report.segments);

        // Re-ingesting the same document doubles the chunk count.
        ingestor
            .ingest(b"pdf-bytes".to_vec(), "ns", "notes.pdf")
            .await
            .expect("re-ingest");
        assert_eq!(
            index.count("ns").await.expect("count"),
            report.segments * 2
        );
    }

    #[tokio::test]
    async fn test_zero_text_document_yields_empty_corpus() {
        let (ingestor, _, index) = ingestor_with(
            IngestMode::Indexed,
            Arc::new(StaticTextExtractor::new("", 4)),
        )
        .await;

        let report = ingestor
            .ingest(b"pdf-bytes".to_vec(), "ns", "scans.pdf")
            .await
            .expect("ingest succeeds despite empty text");
        assert_eq!(report, IngestReport { pages: 4, segments: 0 });
        assert_eq!(index.count("ns").await.expect("count"), 0);
    }

    #[tokio::test]
    async fn test_unparseable_document_propagates_unsupported_format() {
        let (ingestor, _, _) =
            ingestor_with(IngestMode::Indexed, Arc::new(RejectingExtractor)).await;

        let result = ingestor.ingest(b"junk".to_vec(), "ns", "junk.bin").await;
        assert!(matches!(result, Err(AppError::UnsupportedFormat(_))));
    }
}
