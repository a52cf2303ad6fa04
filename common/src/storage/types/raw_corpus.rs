use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::AppError, storage::store::StorageManager, storage::types::StoredObject, stored_object,
};

stored_object!(RawCorpus, "corpus", {
    text: String,
    pages: usize,
    source_name: String
});

impl RawCorpus {
    pub fn new(text: String, pages: usize, source_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            text,
            pages,
            source_name,
        }
    }

    fn location(namespace: &str) -> String {
        format!("{}/{namespace}.json", Self::collection())
    }

    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty()
    }

    pub async fn find(
        namespace: &str,
        storage: &StorageManager,
    ) -> Result<Option<Self>, AppError> {
        storage.get_json(&Self::location(namespace)).await
    }

    /// Replaces the namespace's stored corpus wholesale, dropping any prior
    /// content.
    pub async fn replace(
        &self,
        namespace: &str,
        storage: &StorageManager,
    ) -> Result<(), AppError> {
        storage.put_json(&Self::location(namespace), self).await
    }
}
