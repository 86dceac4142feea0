use serde::{Deserialize, Serialize};

use crate::services::store::Document;

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub id: String,
    pub original_filename: String,
    pub size_bytes: usize,
    pub page_count: usize,
    pub char_count: usize,
    pub chunk_count: usize,
    pub created_at: String,
}

impl From<&Document> for DocumentResponse {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.to_string(),
            original_filename: doc.original_filename.clone(),
            size_bytes: doc.size_bytes,
            page_count: doc.page_count,
            char_count: doc.char_count,
            chunk_count: doc.chunks.len(),
            created_at: doc.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    pub model: String,
    pub context_chunks: usize,
}
