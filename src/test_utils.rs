//! Shared fixtures for handler tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::{AppConfig, LlmConfig, ServerConfig, StoreConfig, UploadConfig};
use crate::services::chunker::ChunkingConfig;
use crate::services::llm_provider::{ChatMessage, Completer, CompletionFailure};
use crate::state::AppState;

/// Returns a canned reply and records every request it receives.
pub struct FakeCompleter {
    reply: Result<String, CompletionFailure>,
    pub seen: Mutex<Vec<(String, Vec<ChatMessage>)>>,
}

impl FakeCompleter {
    pub fn new(reply: Result<String, CompletionFailure>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Completer for FakeCompleter {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, CompletionFailure> {
        self.seen
            .lock()
            .unwrap()
            .push((model.to_string(), messages.to_vec()));
        self.reply.clone()
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        llm: LlmConfig {
            provider: "openrouter".into(),
            model: "test-model".into(),
            system_prompt: "Answer from the PDF.".into(),
            context_chunks: 2,
            api_key: None,
        },
        chunking: ChunkingConfig {
            chunk_size: 4,
            overlap: 2,
        },
        upload: UploadConfig {
            max_file_size_mb: 1,
        },
        store: StoreConfig { capacity: 4 },
    }
}

pub fn state_with(completer: Arc<FakeCompleter>) -> AppState {
    AppState::new(test_config(), completer)
}

pub async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Builds a single-page PDF whose page draws `content` with Helvetica as `/F1`.
pub fn one_page_pdf(content: &str) -> String {
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
         /Resources << /Font << /F1 5 0 R >> >> >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.push_str(&format!("{} 0 obj\n{body}\nendobj\n", i + 1));
    }

    let xref_offset = pdf.len();
    pdf.push_str(&format!(
        "xref\n0 {}\n0000000000 65535 f \n",
        objects.len() + 1
    ));
    for offset in offsets {
        pdf.push_str(&format!("{offset:010} 00000 n \n"));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        objects.len() + 1
    ));

    pdf
}
