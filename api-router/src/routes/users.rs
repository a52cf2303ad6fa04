use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use common::storage::types::user_account::UserAccount;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{api_state::ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub student_id: Option<String>,
}

/// Login or register a user by email.
pub async fn login(
    State(state): State<ApiState>,
    Json(input): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if input.name.trim().is_empty() || input.email.trim().is_empty() {
        return Err(ApiError::ValidationError(
            "name and email are required".into(),
        ));
    }

    let user = UserAccount::login(input.name, input.email, input.student_id, &state.storage).await?;

    info!(user_id = %user.id, "user logged in");

    Ok(Json(json!({ "success": true, "user": user })))
}

pub async fn get_user(
    State(state): State<ApiState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user = UserAccount::find_by_id(&user_id, &state.storage)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(Json(json!({ "success": true, "user": user })))
}

pub async fn list_users(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let users = UserAccount::list_all(&state.storage).await?;
    Ok(Json(json!({ "success": true, "users": users })))
}
