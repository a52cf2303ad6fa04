use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use super::embedding::EmbeddingBackend;

#[derive(Clone, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Local,
    Memory,
}

/// How uploaded documents become a caller's corpus.
///
/// `Raw` keeps the whole extracted text as one context block and replaces it
/// on every upload; `Indexed` chunks, embeds and appends to the caller's
/// vector index.
#[derive(Clone, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IngestMode {
    Raw,
    Indexed,
}

#[derive(Clone, Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default = "default_storage_kind")]
    pub storage: StorageKind,
    #[serde(default = "default_ingest_mode")]
    pub ingest_mode: IngestMode,
    #[serde(default = "default_generation_base_url")]
    pub generation_base_url: String,
    /// Pinned generation model id. When set, the per-credential catalog query
    /// is skipped entirely; when unset, the first generate-capable catalog
    /// entry is used.
    #[serde(default)]
    pub generation_model: Option<String>,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
    #[serde(default = "default_retrieval_top_k")]
    pub retrieval_top_k: usize,
    #[serde(default = "default_embed_batch_size")]
    pub embed_batch_size: usize,
    #[serde(default = "default_embed_batch_delay_secs")]
    pub embed_batch_delay_secs: u64,
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,
    #[serde(default = "default_upload_max_body_bytes")]
    pub upload_max_body_bytes: usize,
    #[serde(default)]
    pub embedding_backend: EmbeddingBackend,
    #[serde(default)]
    pub embedding_model: Option<String>,
    #[serde(default = "default_hashed_embedding_dimension")]
    pub hashed_embedding_dimension: usize,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_http_port() -> u16 {
    8000
}

fn default_storage_kind() -> StorageKind {
    StorageKind::Local
}

fn default_ingest_mode() -> IngestMode {
    IngestMode::Indexed
}

fn default_generation_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    200
}

fn default_retrieval_top_k() -> usize {
    5
}

fn default_embed_batch_size() -> usize {
    5
}

fn default_embed_batch_delay_secs() -> u64 {
    2
}

fn default_upstream_timeout_secs() -> u64 {
    30
}

fn default_upload_max_body_bytes() -> usize {
    10_000_000
}

fn default_hashed_embedding_dimension() -> usize {
    384
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            http_port: default_http_port(),
            storage: default_storage_kind(),
            ingest_mode: default_ingest_mode(),
            generation_base_url: default_generation_base_url(),
            generation_model: None,
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            retrieval_top_k: default_retrieval_top_k(),
            embed_batch_size: default_embed_batch_size(),
            embed_batch_delay_secs: default_embed_batch_delay_secs(),
            upstream_timeout_secs: default_upstream_timeout_secs(),
            upload_max_body_bytes: default_upload_max_body_bytes(),
            embedding_backend: EmbeddingBackend::default(),
            embedding_model: None,
            hashed_embedding_dimension: default_hashed_embedding_dimension(),
        }
    }
}

pub fn get_config() -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::with_name("config").required(false))
        .add_source(Environment::default())
        .build()?;

    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_source_parameters() {
        let config = AppConfig::default();
        assert_eq!(config.chunk_size, 1000);
        assert_eq!(config.chunk_overlap, 200);
        assert_eq!(config.retrieval_top_k, 5);
        assert_eq!(config.embed_batch_size, 5);
        assert_eq!(config.embed_batch_delay_secs, 2);
        assert!(config.generation_model.is_none());
    }

    #[test]
    fn test_mode_deserializes_lowercase() {
        let mode: IngestMode = serde_json::from_str(r#""raw""#).expect("parse mode");
        assert_eq!(mode, IngestMode::Raw);
        let kind: StorageKind = serde_json::from_str(r#""memory""#).expect("parse kind");
        assert_eq!(kind, StorageKind::Memory);
    }
}
