use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::{error::AppError, storage::store::StorageManager, stored_object};

/// Location of the global user directory document.
const USERS_LOCATION: &str = "users.json";

stored_object!(UserAccount, "users", {
    name: String,
    email: String,
    #[serde(rename = "studentId", default)]
    student_id: Option<String>,
    #[serde(rename = "loginTime")]
    login_time: chrono::DateTime<chrono::Utc>
});

impl UserAccount {
    fn new(name: String, email: String, student_id: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            name,
            email,
            student_id,
            login_time: now,
        }
    }

    async fn load_directory(
        storage: &StorageManager,
    ) -> Result<HashMap<String, Self>, AppError> {
        Ok(storage
            .get_json(USERS_LOCATION)
            .await?
            .unwrap_or_default())
    }

    async fn save_directory(
        directory: &HashMap<String, Self>,
        storage: &StorageManager,
    ) -> Result<(), AppError> {
        storage.put_json(USERS_LOCATION, directory).await
    }

    /// Login-or-register: an existing account (matched by email) gets its
    /// name and login time refreshed; otherwise a new account is created.
    pub async fn login(
        name: String,
        email: String,
        student_id: Option<String>,
        storage: &StorageManager,
    ) -> Result<Self, AppError> {
        let mut directory = Self::load_directory(storage).await?;

        let existing_id = directory
            .values()
            .find(|user| user.email == email)
            .map(|user| user.id.clone());

        let user = match existing_id {
            Some(id) => {
                let now = Utc::now();
                let user = directory
                    .get_mut(&id)
                    .ok_or_else(|| AppError::NotFound("User vanished during login".into()))?;
                user.name = name;
                user.login_time = now;
                user.updated_at = now;
                user.clone()
            }
            None => {
                let user = Self::new(name, email, student_id);
                directory.insert(user.id.clone(), user.clone());
                user
            }
        };

        Self::save_directory(&directory, storage).await?;
        Ok(user)
    }

    pub async fn find_by_id(
        id: &str,
        storage: &StorageManager,
    ) -> Result<Option<Self>, AppError> {
        Ok(Self::load_directory(storage).await?.remove(id))
    }

    pub async fn list_all(storage: &StorageManager) -> Result<Vec<Self>, AppError> {
        let mut users: Vec<Self> = Self::load_directory(storage).await?.into_values().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(users)
    }
}
