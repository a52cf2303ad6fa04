use axum::{extract::State, response::IntoResponse, Extension, Json};
use common::storage::types::project::Project;
use serde_json::json;

use crate::{api_state::ApiState, error::ApiError, middleware_api_auth::Caller};

pub async fn get_projects(
    State(state): State<ApiState>,
    Extension(caller): Extension<Caller>,
) -> Result<impl IntoResponse, ApiError> {
    let projects = Project::load_for(&caller.namespace, &state.storage).await?;
    Ok(Json(json!({ "projects": projects })))
}

/// Replaces the caller's whole project list; there are no partial updates.
pub async fn save_projects(
    State(state): State<ApiState>,
    Extension(caller): Extension<Caller>,
    Json(projects): Json<Vec<Project>>,
) -> Result<impl IntoResponse, ApiError> {
    Project::save_for(&caller.namespace, &projects, &state.storage).await?;
    Ok(Json(
        json!({ "success": true, "message": "Projects saved." }),
    ))
}
