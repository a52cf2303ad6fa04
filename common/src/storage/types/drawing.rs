use serde::{Deserialize, Serialize};

use crate::{error::AppError, storage::store::StorageManager};

/// A client-owned canvas drawing; `data` is the frontend's serialized canvas
/// payload and is stored opaquely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Drawing {
    pub id: i64,
    pub name: String,
    pub data: String,
    pub created_at: String,
}

impl Drawing {
    fn location(namespace: &str) -> String {
        format!("drawings/{namespace}.json")
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
        drawings: &[Self],
        storage: &StorageManager,
    ) -> Result<(), AppError> {
        storage.put_json(&Self::location(namespace), &drawings).await
    }
}
