use std::time::Duration;

use async_trait::async_trait;
use common::{error::AppError, utils::config::AppConfig};
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, info};

/// A chunk that has been split but not yet embedded or indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingChunk {
    pub source_id: String,
    pub seq: usize,
    pub text: String,
}

/// Receiver for paced chunk batches; embeds and stores each batch.
#[async_trait]
pub trait ChunkSink: Send + Sync {
    async fn submit(&self, namespace: &str, batch: &[PendingChunk]) -> Result<(), AppError>;
}

/// Fixed pacing parameters for bulk embedding, sized to stay under the
/// remote embedding quota.
#[derive(Debug, Clone, Copy)]
pub struct GovernorSettings {
    pub batch_size: usize,
    pub batch_delay: Duration,
}

impl GovernorSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            batch_size: config.embed_batch_size,
            batch_delay: Duration::from_secs(config.embed_batch_delay_secs),
        }
    }
}

/// Pacing failure carrying partial progress for the caller.
#[derive(Debug, Error)]
#[error("ingestion aborted after {submitted} of {total} chunks: {source}")]
pub struct GovernorError {
    pub submitted: usize,
    pub total: usize,
    #[source]
    pub source: AppError,
}

/// Submits chunks in fixed-size batches with a fixed delay between batches.
///
/// Deterministic pacing, not adaptive: no backoff and no retry. The first
/// failing batch aborts the run (fail-fast) and the error reports how many
/// chunks made it in before the failure.
pub async fn submit_paced(
    sink: &dyn ChunkSink,
    namespace: &str,
    chunks: &[PendingChunk],
    settings: GovernorSettings,
) -> Result<usize, GovernorError> {
    let total = chunks.len();
    let batch_size = settings.batch_size.max(1);
    let mut submitted = 0;

    for (batch_index, batch) in chunks.chunks(batch_size).enumerate() {
        if batch_index > 0 {
            sleep(settings.batch_delay).await;
        }

        sink.submit(namespace, batch)
            .await
            .map_err(|source| GovernorError {
                submitted,
                total,
                source,
            })?;

        submitted += batch.len();
        debug!(
            namespace,
            batch = batch_index + 1,
            submitted,
            total,
            "submitted embedding batch"
        );
    }

    if total > 0 {
        info!(namespace, total, "paced ingestion complete");
    }

    Ok(submitted)
}
