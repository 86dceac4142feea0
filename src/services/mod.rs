pub mod chunker;
pub mod document;
pub mod llm_provider;
pub mod pdf;
pub mod prompt;
pub mod store;
