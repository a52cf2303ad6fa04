use chrono::Utc;
use uuid::Uuid;

use crate::stored_object;

stored_object!(TextChunk, "index", {
    source_id: String,
    seq: usize,
    text: String,
    embedding: Vec<f32>
});

impl TextChunk {
    pub fn new(source_id: String, seq: usize, text: String, embedding: Vec<f32>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            source_id,
            seq,
            text,
            embedding,
        }
    }
}
