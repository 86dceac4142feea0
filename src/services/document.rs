use crate::errors::AppError;
use crate::services::chunker::ChunkingConfig;
use crate::services::pdf;

/// Text and chunks derived from one uploaded document.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestedDocument {
    pub page_count: usize,
    pub char_count: usize,
    pub chunks: Vec<String>,
}

/// Joins extracted pages and chunks the result.
///
/// Whitespace-only documents are rejected before any chunking happens.
pub fn ingest(pages: &[String], chunking: &ChunkingConfig) -> Result<IngestedDocument, AppError> {
    let text = pdf::join_pages(pages);

    if text.trim().is_empty() {
        return Err(AppError::EmptyDocument);
    }

    let chunks = chunking.chunk(&text)?;

    Ok(IngestedDocument {
        page_count: pages.len(),
        char_count: text.chars().count(),
        chunks,
    })
}
