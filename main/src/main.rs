use std::sync::Arc;

use api_router::{api_routes_v1, api_state::ApiState};
use axum::Router;
use common::{
    storage::store::StorageManager,
    utils::{
        config::get_config, embedding::EmbeddingProvider, generation::HttpGenerationClient,
    },
};
use ingestion_pipeline::PdfTextExtractor;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();

    // Get config
    let config = get_config()?;

    // Create global storage manager
    let storage = StorageManager::new(&config).await?;

    // Create embedding provider based on config
    let embedding_provider = Arc::new(EmbeddingProvider::from_config(&config).await?);
    info!(
        embedding_backend = embedding_provider.backend_label(),
        embedding_dimension = embedding_provider.dimension(),
        "Embedding provider initialized"
    );

    let generation_client = Arc::new(HttpGenerationClient::new(&config)?);

    let api_state = ApiState::new(
        &config,
        storage,
        Arc::new(PdfTextExtractor),
        embedding_provider,
        generation_client,
    );

    // The browser frontend is served elsewhere, so CORS stays permissive.
    let app = Router::new()
        .nest("/api/v1", api_routes_v1(&api_state))
        .layer(CorsLayer::permissive());

    info!("Starting server listening on 0.0.0.0:{}", config.http_port);
    let serve_address = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(serve_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
