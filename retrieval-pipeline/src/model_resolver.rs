use std::sync::Arc;

use common::{
    error::AppError,
    utils::generation::{GenerationClient, ModelInfo},
};
use tracing::debug;

/// A short-lived binding between a caller credential and a concrete
/// generation model id. Re-resolved per call; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelHandle {
    pub model_id: String,
    pub pinned: bool,
}

/// Resolves which generation model a credential may use.
///
/// A configured model id short-circuits the catalog query; otherwise the
/// credential's catalog is fetched and the first generate-capable entry wins.
/// Catalog order is external and not guaranteed stable between calls, which
/// is why pinning is the preferred path.
pub struct ModelResolver {
    client: Arc<dyn GenerationClient>,
    pinned: Option<String>,
}

impl ModelResolver {
    pub fn new(client: Arc<dyn GenerationClient>, pinned: Option<String>) -> Self {
        Self { client, pinned }
    }

    pub async fn resolve(&self, credential: &str) -> Result<ModelHandle, AppError> {
        if let Some(model_id) = &self.pinned {
            return Ok(ModelHandle {
                model_id: model_id.clone(),
                pinned: true,
            });
        }

        let catalog = self.client.list_models(credential).await?;
        let candidate = first_generation_capable(&catalog).ok_or_else(|| {
            AppError::NoUsableModel(
                "the credential grants access to no generation-capable models".into(),
            )
        })?;

        debug!(model = %candidate.name, "auto-selected generation model from catalog order");

        Ok(ModelHandle {
            model_id: candidate.name.clone(),
            pinned: false,
        })
    }
}

fn first_generation_capable(catalog: &[ModelInfo]) -> Option<&ModelInfo> {
    catalog.iter().find(|model| model.supports_generation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::utils::generation::testing::{
        embedding_only_model, generation_model, StubGenerationClient, StubReply,
    };

    #[tokio::test]
    async fn test_resolver_fails_with_no_usable_model() {
        let client = Arc::new(StubGenerationClient::new(
            vec![
                embedding_only_model("models/embedding-001"),
                embedding_only_model("models/aqa"),
            ],
            StubReply::EchoPrompt,
        ));
        let resolver = ModelResolver::new(client, None);

        let result = resolver.resolve("sk_key").await;
        assert!(matches!(result, Err(AppError::NoUsableModel(_))));
    }

    #[tokio::test]
    async fn test_resolver_binds_first_capable_entry() {
        let client = Arc::new(StubGenerationClient::new(
            vec![
                embedding_only_model("models/embedding-001"),
                generation_model("models/tutor-mini"),
                generation_model("models/tutor-pro"),
            ],
            StubReply::EchoPrompt,
        ));
        let resolver = ModelResolver::new(client, None);

        let handle = resolver.resolve("sk_key").await.expect("resolve");
        assert_eq!(handle.model_id, "models/tutor-mini");
        assert!(!handle.pinned);
    }

    #[tokio::test]
    async fn test_pinned_model_skips_catalog_query() {
        let client = Arc::new(StubGenerationClient::echoing());
        let resolver = ModelResolver::new(client.clone(), Some("models/pinned".into()));

        let handle = resolver.resolve("sk_key").await.expect("resolve");
        assert_eq!(handle.model_id, "models/pinned");
        assert!(handle.pinned);
        assert_eq!(client.list_call_count(), 0);
    }

    #[tokio::test]
    async fn test_rejected_credential_propagates() {
        let client = Arc::new(StubGenerationClient::rejecting_credentials());
        let resolver = ModelResolver::new(client, None);

        let result = resolver.resolve("bad_key").await;
        assert!(matches!(result, Err(AppError::InvalidCredential(_))));
    }
}
