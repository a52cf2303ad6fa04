use serde::{Deserialize, Serialize};

use crate::{error::AppError, storage::store::StorageManager};

/// A client-owned project record.
///
/// The frontend defines the shape; the backend stores each caller's list
/// whole and rewrites it whole on every save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<serde_json::Value>,
    pub created_at: String,
}

impl Project {
    fn location(namespace: &str) -> String {
        format!("projects/{namespace}.json")
    }

    pub async fn load_for(
        namespace: &str,
        storage: &StorageManager,
    ) -> Result<Vec<Self>, AppError> {
        Ok(storage
            .get_json(&Self::location(namespace))
            .await?
            .unwrap_or_default())
    }

    pub async fn save_for(
        namespace: &str,
        projects: &[Self],
        storage: &StorageManager,
    ) -> Result<(), AppError> {
        storage.put_json(&Self::location(namespace), &projects).await
    }
}
