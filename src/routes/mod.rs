pub mod documents;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Multipart framing on top of the raw file size.
const UPLOAD_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.upload.max_file_size_bytes() + UPLOAD_OVERHEAD_BYTES;

    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/documents", post(documents::upload))
        .route(
            "/api/documents/{id}",
            get(documents::get_document).delete(documents::delete_document),
        )
        .route("/api/documents/{id}/ask", post(documents::ask))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
