use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use axum_typed_multipart::{FieldData, TryFromMultipart, TypedMultipart};
use bytes::Bytes;
use common::utils::config::IngestMode;
use serde_json::json;
use tracing::info;

use crate::{api_state::ApiState, error::ApiError, middleware_api_auth::Caller};

#[derive(Debug, TryFromMultipart)]
pub struct UploadParams {
    #[form_data(limit = "10000000")]
    pub file: FieldData<Bytes>,
}

pub async fn upload_document(
    State(state): State<ApiState>,
    Extension(caller): Extension<Caller>,
    TypedMultipart(input): TypedMultipart<UploadParams>,
) -> Result<impl IntoResponse, ApiError> {
    let file_name = input
        .file
        .metadata
        .file_name
        .clone()
        .unwrap_or_else(|| "upload.pdf".to_owned());

    if !file_name.to_ascii_lowercase().ends_with(".pdf") {
        return Err(ApiError::ValidationError("Please upload a PDF.".into()));
    }

    info!(
        namespace = %caller.namespace,
        file_name,
        bytes = input.file.contents.len(),
        "received document upload"
    );

    let report = state
        .ingestor
        .ingest(input.file.contents.to_vec(), &caller.namespace, &file_name)
        .await?;

    let message = match state.config.ingest_mode {
        IngestMode::Raw => format!("Read {} pages.", report.pages),
        IngestMode::Indexed => format!(
            "Stored {} segments from {} pages.",
            report.segments, report.pages
        ),
    };

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": message,
            "pages": report.pages,
            "segments": report.segments
        })),
    ))
}
