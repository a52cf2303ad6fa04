use axum::{extract::Request, middleware::Next, response::Response};

use common::utils::namespace::namespace_for;

use crate::error::ApiError;

/// The caller identity attached to every protected request.
///
/// The credential is opaque: it is forwarded to the generation service as-is
/// and hashed into the storage namespace. It is never checked against a user
/// table.
#[derive(Clone, Debug)]
pub struct Caller {
    pub credential: String,
    pub namespace: String,
}

pub async fn api_auth(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let credential = extract_api_key(&request)
        .ok_or_else(|| ApiError::Unauthorized("API key missing.".to_string()))?;

    let namespace = namespace_for(&credential);
    request.extensions_mut().insert(Caller {
        credential,
        namespace,
    });

    Ok(next.run(request).await)
}

fn extract_api_key(request: &Request) -> Option<String> {
    request
        .headers()
        .get("X-API-Key")
        .and_then(|v| v.to_str().ok())
        .or_else(|| {
            request
                .headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok())
                .and_then(|auth| auth.strip_prefix("Bearer ").map(str::trim))
        })
        .filter(|key| !key.is_empty())
        .map(String::from)
}
