use serde::{Deserialize, Serialize};
pub mod drawing;
pub mod project;
pub mod raw_corpus;
pub mod text_chunk;
pub mod user_account;

/// A server-owned record persisted as part of a whole JSON document.
pub trait StoredObject: Serialize + for<'de> Deserialize<'de> {
    /// Top-level prefix the record's documents live under.
    fn collection() -> &'static str;
    fn get_id(&self) -> &str;
}

#[macro_export]
macro_rules! stored_object {
    ($name:ident, $collection:expr, {$($(#[$attr:meta])* $field:ident: $ty:ty),*}) => {
        #[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
        pub struct $name {
            pub id: String,
            #[serde(default = "chrono::Utc::now")]
            pub created_at: chrono::DateTime<chrono::Utc>,
            #[serde(default = "chrono::Utc::now")]
            pub updated_at: chrono::DateTime<chrono::Utc>,
            $( $(#[$attr])* pub $field: $ty),*
        }

        impl $crate::storage::types::StoredObject for $name {
            fn collection() -> &'static str {
                $collection
            }

            fn get_id(&self) -> &str {
                &self.id
            }
        }
    };
}
