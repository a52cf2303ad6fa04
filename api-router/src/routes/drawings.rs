use axum::{extract::State, response::IntoResponse, Extension, Json};
use common::storage::types::drawing::Drawing;
use serde_json::json;

use crate::{api_state::ApiState, error::ApiError, middleware_api_auth::Caller};

pub async fn get_drawings(
    State(state): State<ApiState>,
    Extension(caller): Extension<Caller>,
) -> Result<impl IntoResponse, ApiError> {
    let drawings = Drawing::load_for(&caller.namespace, &state.storage).await?;
    Ok(Json(json!({ "drawings": drawings })))
}

/// Replaces the caller's whole drawing list; there are no partial updates.
pub async fn save_drawings(
    State(state): State<ApiState>,
    Extension(caller): Extension<Caller>,
    Json(drawings): Json<Vec<Drawing>>,
) -> Result<impl IntoResponse, ApiError> {
    Drawing::save_for(&caller.namespace, &drawings, &state.storage).await?;
    Ok(Json(
        json!({ "success": true, "message": "Drawings saved." }),
    ))
}
