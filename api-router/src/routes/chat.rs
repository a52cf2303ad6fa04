use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{
    api_state::ApiState, error::ApiError, middleware_api_auth::Caller, routes::render_outcome,
};

#[derive(Debug, Deserialize)]
pub struct ChatParams {
    pub query: String,
}

/// Answer entry: always a 200-shaped body carrying answer text, the
/// empty-corpus sentinel, or a marker-prefixed soft error.
pub async fn chat(
    State(state): State<ApiState>,
    Extension(caller): Extension<Caller>,
    Query(params): Query<ChatParams>,
) -> Result<impl IntoResponse, ApiError> {
    if params.query.trim().is_empty() {
        return Err(ApiError::ValidationError("query must not be empty".into()));
    }

    info!(namespace = %caller.namespace, "answering question");

    let outcome = state
        .answerer
        .answer(&params.query, &caller.namespace, &caller.credential)
        .await;

    Ok(Json(json!({ "answer": render_outcome(outcome) })))
}
