use crate::config::AppConfig;
use crate::services::llm_provider::Completer;
use crate::services::store::DocumentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub completer: Arc<dyn Completer>,
    pub documents: DocumentStore,
}

impl AppState {
    pub fn new(config: AppConfig, completer: Arc<dyn Completer>) -> Self {
        let documents = DocumentStore::new(config.store.capacity);
        Self {
            config: Arc::new(config),
            completer,
            documents,
        }
    }
}
