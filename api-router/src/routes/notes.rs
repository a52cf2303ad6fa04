use axum::{extract::State, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{
    api_state::ApiState, error::ApiError, middleware_api_auth::Caller, routes::render_outcome,
};

#[derive(Debug, Deserialize)]
pub struct NotesAiHelpRequest {
    pub prompt: String,
    /// Frontend-supplied hint (summarize, rewrite, ...); logged but not
    /// interpreted server-side.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Direct generation without retrieval, used by the notes editor.
pub async fn notes_ai_help(
    State(state): State<ApiState>,
    Extension(caller): Extension<Caller>,
    Json(input): Json<NotesAiHelpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if input.prompt.trim().is_empty() {
        return Err(ApiError::ValidationError("prompt must not be empty".into()));
    }

    info!(
        namespace = %caller.namespace,
        kind = input.kind.as_deref().unwrap_or("unspecified"),
        "notes AI help request"
    );

    let outcome = state
        .gateway
        .complete_soft(&caller.credential, &input.prompt)
        .await;

    Ok(Json(json!({ "result": render_outcome(outcome) })))
}
