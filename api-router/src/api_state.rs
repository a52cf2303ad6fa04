use std::sync::Arc;

use common::{
    storage::store::StorageManager,
    utils::{config::AppConfig, embedding::EmbeddingProvider, generation::GenerationClient},
};
use ingestion_pipeline::{DocumentIngestor, TextExtractor};
use retrieval_pipeline::{GenerationGateway, QueryAnswerer, TaskPrioritizer, VectorIndex};

#[derive(Clone)]
pub struct ApiState {
    pub config: AppConfig,
    pub storage: StorageManager,
    pub ingestor: Arc<DocumentIngestor>,
    pub answerer: Arc<QueryAnswerer>,
    pub prioritizer: Arc<TaskPrioritizer>,
    pub gateway: Arc<GenerationGateway>,
}

impl ApiState {
    /// Wires the pipelines around injected external capabilities so tests
    /// can swap in fakes for the extractor, embedder and generation service.
    pub fn new(
        config: &AppConfig,
        storage: StorageManager,
        extractor: Arc<dyn TextExtractor>,
        embedder: Arc<EmbeddingProvider>,
        generation_client: Arc<dyn GenerationClient>,
    ) -> Self {
        let index = VectorIndex::new(storage.clone());
        let gateway = Arc::new(GenerationGateway::new(
            generation_client,
            config.generation_model.clone(),
        ));

        let ingestor = Arc::new(DocumentIngestor::new(
            config,
            storage.clone(),
            extractor,
            embedder.clone(),
            index.clone(),
        ));
        let answerer = Arc::new(QueryAnswerer::new(
            storage.clone(),
            index,
            embedder,
            gateway.clone(),
            config.ingest_mode.clone(),
            config.retrieval_top_k,
        ));
        let prioritizer = Arc::new(TaskPrioritizer::new(gateway.clone()));

        Self {
            config: config.clone(),
            storage,
            ingestor,
            answerer,
            prioritizer,
            gateway,
        }
    }
}
