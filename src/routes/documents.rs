use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::dto::document::{AskRequest, AskResponse, DocumentResponse};
use crate::errors::AppError;
use crate::services::document::ingest;
use crate::services::store::Document;
use crate::services::{pdf, prompt};
use crate::state::AppState;

fn is_pdf(content_type: Option<&str>, filename: &str) -> bool {
    match content_type {
        Some("application/pdf") => true,
        None | Some("application/octet-stream") => filename.to_lowercase().ends_with(".pdf"),
        Some(_) => false,
    }
}

pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DocumentResponse>, AppError> {
    let max_size = state.config.upload.max_file_size_bytes();

    let (original_filename, data) = loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid multipart data: {e}")))?
            .ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

        if field.name() != Some("file") {
            continue;
        }

        let original_filename = field.file_name().unwrap_or("unnamed.pdf").to_string();

        if !is_pdf(field.content_type(), &original_filename) {
            return Err(AppError::Validation(
                "Only PDF files are supported".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;

        break (original_filename, data);
    };

    if data.len() > max_size {
        return Err(AppError::Validation(format!(
            "File too large. Maximum size is {} MB",
            state.config.upload.max_file_size_mb
        )));
    }

    let size_bytes = data.len();
    let pages = tokio::task::spawn_blocking(move || pdf::extract_pages(&data))
        .await
        .map_err(|e| AppError::UnreadablePdf(format!("PDF parser aborted: {e}")))?
        .map_err(|e| AppError::UnreadablePdf(format!("{e:#}")))?;

    let ingested = ingest(&pages, &state.config.chunking)?;
    let doc = state
        .documents
        .insert(Document::new(&original_filename, size_bytes, ingested));

    tracing::info!(
        "Document {} ({original_filename}) loaded with {} text chunks",
        doc.id,
        doc.chunks.len()
    );

    Ok(Json(DocumentResponse::from(doc.as_ref())))
}

pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentResponse>, AppError> {
    let doc = state
        .documents
        .get(&id)
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

    Ok(Json(DocumentResponse::from(doc.as_ref())))
}

pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .documents
        .remove(&id)
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn ask(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    let question = payload.question.trim();
    if question.is_empty() {
        return Err(AppError::Validation("Question cannot be empty".to_string()));
    }

    let doc = state
        .documents
        .get(&id)
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

    let llm = &state.config.llm;
    let (context, context_chunks) = prompt::select_context(&doc.chunks, llm.context_chunks);
    let messages = prompt::build_messages(&llm.system_prompt, &context, question);

    let answer = state.completer.complete(&llm.model, &messages).await?;

    tracing::info!("Answered question on document {id} using {context_chunks} chunks");

    Ok(Json(AskResponse {
        answer,
        model: llm.model.clone(),
        context_chunks,
    }))
}
