use axum::{extract::State, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{
    api_state::ApiState, error::ApiError, middleware_api_auth::Caller, routes::render_outcome,
};

#[derive(Debug, Deserialize)]
pub struct TaskListRequest {
    pub tasks: Vec<String>,
}

pub async fn prioritize_tasks(
    State(state): State<ApiState>,
    Extension(caller): Extension<Caller>,
    Json(input): Json<TaskListRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if input.tasks.is_empty() || input.tasks.iter().all(|task| task.trim().is_empty()) {
        return Err(ApiError::ValidationError(
            "tasks must contain at least one non-empty entry".into(),
        ));
    }

    info!(namespace = %caller.namespace, tasks = input.tasks.len(), "prioritizing tasks");

    let outcome = state
        .prioritizer
        .prioritize(&input.tasks, &caller.credential)
        .await;

    Ok(Json(json!({ "plan": render_outcome(outcome) })))
}
