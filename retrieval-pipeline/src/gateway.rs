use std::sync::Arc;

use common::{error::AppError, utils::generation::GenerationClient};
use tracing::warn;

use crate::{
    model_resolver::{ModelHandle, ModelResolver},
    outcome::AnswerOutcome,
};

/// The shared resolve-then-generate step behind every model-facing feature.
pub struct GenerationGateway {
    resolver: ModelResolver,
    client: Arc<dyn GenerationClient>,
}

impl GenerationGateway {
    pub fn new(client: Arc<dyn GenerationClient>, pinned_model: Option<String>) -> Self {
        Self {
            resolver: ModelResolver::new(client.clone(), pinned_model),
            client,
        }
    }

    /// Resolution alone, for the key-test tooling where failures stay hard.
    pub async fn resolve(&self, credential: &str) -> Result<ModelHandle, AppError> {
        self.resolver.resolve(credential).await
    }

    pub async fn complete(&self, credential: &str, prompt: &str) -> Result<String, AppError> {
        let handle = self.resolver.resolve(credential).await?;
        self.client
            .generate(credential, &handle.model_id, prompt)
            .await
    }

    /// `complete` with generation-path failures converted into a tagged soft
    /// outcome instead of an error.
    pub async fn complete_soft(&self, credential: &str, prompt: &str) -> AnswerOutcome {
        match self.complete(credential, prompt).await {
            Ok(text) => AnswerOutcome::Answered(text),
            Err(err) => {
                warn!(error = %err, "generation failed; returning soft error payload");
                AnswerOutcome::soft(&err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::utils::generation::testing::{
        generation_model, StubFailure, StubGenerationClient, StubReply,
    };
    use crate::outcome::SoftErrorKind;

    #[tokio::test]
    async fn test_complete_resolves_then_generates() {
        let client = Arc::new(StubGenerationClient::echoing());
        let gateway = GenerationGateway::new(client.clone(), None);

        let text = gateway
            .complete("sk_key", "summarize chapter 2")
            .await
            .expect("complete");
        assert_eq!(text, "summarize chapter 2");
        assert_eq!(client.list_call_count(), 1);
        assert_eq!(client.generate_call_count(), 1);
    }

    #[tokio::test]
    async fn test_complete_soft_converts_quota_failures() {
        let client = Arc::new(StubGenerationClient::new(
            vec![generation_model("models/tutor")],
            StubReply::Fail(StubFailure::QuotaExceeded),
        ));
        let gateway = GenerationGateway::new(client, None);

        let outcome = gateway.complete_soft("sk_key", "anything").await;
        match outcome {
            AnswerOutcome::SoftError { kind, .. } => {
                assert_eq!(kind, SoftErrorKind::QuotaExceeded);
            }
            other => panic!("expected soft error, got {other:?}"),
        }
    }
}
