use std::sync::Arc;

use common::{
    error::AppError,
    storage::{store::StorageManager, types::raw_corpus::RawCorpus},
    utils::{config::IngestMode, embedding::EmbeddingProvider},
};
use tracing::{debug, warn};

use crate::{gateway::GenerationGateway, index::VectorIndex, outcome::AnswerOutcome};

/// Sentinel returned when a namespace has no ingested content yet. A normal
/// response, not an error; the model is never called in that case.
pub const EMPTY_CORPUS_MESSAGE: &str =
    "Please upload a document first so there is content to answer from.";

/// Retrieval-augmented answering over one caller's corpus.
pub struct QueryAnswerer {
    storage: StorageManager,
    index: VectorIndex,
    embedder: Arc<EmbeddingProvider>,
    gateway: Arc<GenerationGateway>,
    mode: IngestMode,
    top_k: usize,
}

impl QueryAnswerer {
    pub fn new(
        storage: StorageManager,
        index: VectorIndex,
        embedder: Arc<EmbeddingProvider>,
        gateway: Arc<GenerationGateway>,
        mode: IngestMode,
        top_k: usize,
    ) -> Self {
        Self {
            storage,
            index,
            embedder,
            gateway,
            mode,
            top_k,
        }
    }

    /// Always returns an outcome: failures along the retrieval and generation
    /// path surface as tagged soft errors, never as transport errors.
    pub async fn answer(&self, question: &str, namespace: &str, credential: &str) -> AnswerOutcome {
        match self.answer_inner(question, namespace, credential).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(namespace, error = %err, "answer pipeline failed; returning soft error");
                AnswerOutcome::soft(&err)
            }
        }
    }

    async fn answer_inner(
        &self,
        question: &str,
        namespace: &str,
        credential: &str,
    ) -> Result<AnswerOutcome, AppError> {
        let context = match self.assemble_context(question, namespace).await? {
            Some(context) => context,
            None => return Ok(AnswerOutcome::EmptyCorpus),
        };

        let prompt = compose_answer_prompt(&context, question);
        Ok(self.gateway.complete_soft(credential, &prompt).await)
    }

    /// Builds the context block for the prompt, or `None` when the namespace
    /// has no content.
    async fn assemble_context(
        &self,
        question: &str,
        namespace: &str,
    ) -> Result<Option<String>, AppError> {
        match self.mode {
            IngestMode::Raw => {
                let corpus = RawCorpus::find(namespace, &self.storage).await?;
                Ok(corpus.filter(RawCorpus::has_content).map(|c| c.text))
            }
            IngestMode::Indexed => {
                if self.index.count(namespace).await? == 0 {
                    return Ok(None);
                }

                let query_embedding = self.embedder.embed(question).await?;
                let hits = self
                    .index
                    .search(namespace, &query_embedding, self.top_k)
                    .await?;

                debug!(namespace, hits = hits.len(), "assembled retrieval context");

                let context = hits
                    .iter()
                    .map(|hit| hit.chunk.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n\n");
                Ok(Some(context))
            }
        }
    }
}

/// Fixed prompt template; context and question are explicitly delimited to
/// reduce prompt-injection confusion between the two.
fn compose_answer_prompt(context: &str, question: &str) -> String {
    format!(
        r"You are a study assistant. Answer the question using only the supplied context.

Context:
==================
{context}

Question:
==================
{question}
"
    )
}
