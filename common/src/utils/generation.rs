use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::AppConfig;
use crate::error::AppError;

/// Catalog capability string marking a model as usable for text generation.
pub const GENERATE_CAPABILITY: &str = "generateContent";

/// Upper bound on upstream error detail carried into our own error messages.
const MAX_ERROR_DETAIL_CHARS: usize = 300;

/// One entry of a credential's model catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelInfo {
    pub name: String,
    #[serde(default, rename = "supportedGenerationMethods")]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    pub fn supports_generation(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|method| method == GENERATE_CAPABILITY)
    }
}

/// Client for the hosted generation service.
///
/// The credential is passed per call: each caller brings their own key and
/// the catalog differs between keys.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn list_models(&self, credential: &str) -> Result<Vec<ModelInfo>, AppError>;

    async fn generate(
        &self,
        credential: &str,
        model_id: &str,
        prompt: &str,
    ) -> Result<String, AppError>;
}

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Reqwest-backed client for the Gemini-style generation REST API.
pub struct HttpGenerationClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGenerationClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.generation_base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn models_url(&self) -> String {
        format!("{}/models", self.base_url)
    }

    /// Catalog entries come back fully qualified (`models/<id>`); accept both
    /// qualified and bare ids when building the generation URL.
    fn generate_url(&self, model_id: &str) -> String {
        if model_id.starts_with("models/") {
            format!("{}/{model_id}:generateContent", self.base_url)
        } else {
            format!("{}/models/{model_id}:generateContent", self.base_url)
        }
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, AppError> {
        let response = request.send().await.map_err(classify_transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response.text().await.unwrap_or_default();
        Err(classify_status(status, &detail))
    }
}

#[async_trait]
impl GenerationClient for HttpGenerationClient {
    async fn list_models(&self, credential: &str) -> Result<Vec<ModelInfo>, AppError> {
        let response = self
            .send(
                self.http
                    .get(self.models_url())
                    .header("x-goog-api-key", credential),
            )
            .await?;

        let parsed: ListModelsResponse = response.json().await.map_err(classify_transport_error)?;
        debug!(models = parsed.models.len(), "fetched model catalog");
        Ok(parsed.models)
    }

    async fn generate(
        &self,
        credential: &str,
        model_id: &str,
        prompt: &str,
    ) -> Result<String, AppError> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .send(
                self.http
                    .post(self.generate_url(model_id))
                    .header("x-goog-api-key", credential)
                    .json(&body),
            )
            .await?;

        let parsed: GenerateContentResponse =
            response.json().await.map_err(classify_transport_error)?;

        let candidate = parsed.candidates.into_iter().next().ok_or_else(|| {
            AppError::Processing("generation response contained no candidates".into())
        })?;

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AppError::Processing(
                "generation response contained no text".into(),
            ));
        }

        Ok(text)
    }
}

fn classify_transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::UpstreamTimeout(err.to_string())
    } else if err.is_connect() {
        AppError::UpstreamUnavailable(err.to_string())
    } else {
        AppError::Reqwest(err)
    }
}

fn classify_status(status: StatusCode, detail: &str) -> AppError {
    let detail = truncate_detail(detail);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::InvalidCredential(detail),
        // The upstream rejects malformed keys with 400 rather than 401.
        StatusCode::BAD_REQUEST if detail.contains("API key") => {
            AppError::InvalidCredential(detail)
        }
        StatusCode::TOO_MANY_REQUESTS => AppError::UpstreamQuotaExceeded(detail),
        status if status.is_server_error() => AppError::UpstreamUnavailable(detail),
        status => AppError::Processing(format!("generation service returned {status}: {detail}")),
    }
}

fn truncate_detail(detail: &str) -> String {
    let trimmed = detail.trim();
    if trimmed.chars().count() <= MAX_ERROR_DETAIL_CHARS {
        return trimmed.to_owned();
    }
    trimmed.chars().take(MAX_ERROR_DETAIL_CHARS).collect()
}

/// Deterministic in-process stand-ins for the generation service.
#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    pub fn generation_model(name: &str) -> ModelInfo {
        ModelInfo {
            name: name.to_owned(),
            supported_generation_methods: vec![GENERATE_CAPABILITY.to_owned(), "countTokens".into()],
        }
    }

    pub fn embedding_only_model(name: &str) -> ModelInfo {
        ModelInfo {
            name: name.to_owned(),
            supported_generation_methods: vec!["embedContent".to_owned()],
        }
    }

    #[derive(Debug, Clone)]
    pub enum StubReply {
        /// Return the submitted prompt verbatim.
        EchoPrompt,
        Fixed(String),
        Fail(StubFailure),
    }

    #[derive(Debug, Clone, Copy)]
    pub enum StubFailure {
        InvalidCredential,
        QuotaExceeded,
        Timeout,
        Unavailable,
    }

    impl StubFailure {
        fn to_error(self) -> AppError {
            match self {
                Self::InvalidCredential => AppError::InvalidCredential("stub rejection".into()),
                Self::QuotaExceeded => AppError::UpstreamQuotaExceeded("stub quota".into()),
                Self::Timeout => AppError::UpstreamTimeout("stub timeout".into()),
                Self::Unavailable => AppError::UpstreamUnavailable("stub outage".into()),
            }
        }
    }

    pub struct StubGenerationClient {
        catalog: Vec<ModelInfo>,
        reply: StubReply,
        reject_credential: bool,
        list_calls: AtomicUsize,
        generate_calls: AtomicUsize,
    }

    impl StubGenerationClient {
        pub fn new(catalog: Vec<ModelInfo>, reply: StubReply) -> Self {
            Self {
                catalog,
                reply,
                reject_credential: false,
                list_calls: AtomicUsize::new(0),
                generate_calls: AtomicUsize::new(0),
            }
        }

        /// Echoing stub with a single generate-capable model; the common case
        /// in scenario tests.
        pub fn echoing() -> Self {
            Self::new(
                vec![generation_model("models/test-model")],
                StubReply::EchoPrompt,
            )
        }

        pub fn fixed(text: &str) -> Self {
            Self::new(
                vec![generation_model("models/test-model")],
                StubReply::Fixed(text.to_owned()),
            )
        }

        pub fn rejecting_credentials() -> Self {
            Self {
                reject_credential: true,
                ..Self::echoing()
            }
        }

        pub fn list_call_count(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }

        pub fn generate_call_count(&self) -> usize {
            self.generate_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerationClient for StubGenerationClient {
        async fn list_models(&self, _credential: &str) -> Result<Vec<ModelInfo>, AppError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.reject_credential {
                return Err(AppError::InvalidCredential(
                    "stub rejected the credential".into(),
                ));
            }
            Ok(self.catalog.clone())
        }

        async fn generate(
            &self,
            _credential: &str,
            _model_id: &str,
            prompt: &str,
        ) -> Result<String, AppError> {
            self.generate_calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                StubReply::EchoPrompt => Ok(prompt.to_owned()),
                StubReply::Fixed(text) => Ok(text.clone()),
                StubReply::Fail(failure) => Err(failure.to_error()),
            }
        }
    }
}
