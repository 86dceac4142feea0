use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::services::chunker::ChunkingConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    pub upload: UploadConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub system_prompt: String,
    /// Number of leading chunks sent to the model as document context.
    pub context_chunks: usize,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    pub max_file_size_mb: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub capacity: usize,
}

impl LlmConfig {
    /// The configured key, falling back to `OPENAI_API_KEY`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }
}

impl UploadConfig {
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        let config: AppConfig = Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()?;

        config
            .chunking
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        if config.llm.context_chunks == 0 {
            return Err(ConfigError::Message(
                "llm.context_chunks must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }
}
