use axum::{extract::State, response::IntoResponse, Extension, Json};
use serde_json::json;
use tracing::info;

use crate::{api_state::ApiState, error::ApiError, middleware_api_auth::Caller};

/// Key-test tooling: resolves the caller's usable generation model.
///
/// Unlike the answer paths, credential problems here are hard rejections:
/// a rejected key is 401 and an empty model catalog is 404.
pub async fn check_key(
    State(state): State<ApiState>,
    Extension(caller): Extension<Caller>,
) -> Result<impl IntoResponse, ApiError> {
    let handle = state.gateway.resolve(&caller.credential).await?;

    info!(model = %handle.model_id, pinned = handle.pinned, "credential check passed");

    Ok(Json(json!({
        "status": "ok",
        "model": handle.model_id,
        "pinned": handle.pinned
    })))
}
