use anyhow::{Context, Result};
use async_trait::async_trait;
use rig::client::completion::CompletionClientDyn;
use rig::client::{ProviderClient, ProviderValue};
use rig::completion::{Chat, CompletionError, PromptError};
use rig::message::Message;
use rig::providers::{anthropic, deepseek, groq, mistral, ollama, openai, openrouter};
use serde::{Deserialize, Serialize};

fn create_provider_boxed(provider: &str, api_key: &str) -> Result<Box<dyn ProviderClient>> {
    let value = ProviderValue::Simple(api_key.to_string());

    let boxed: Box<dyn ProviderClient> = match provider.to_lowercase().as_str() {
        "openai" => {
            let c: openai::Client<reqwest::Client> = openai::Client::from_val(value);
            c.boxed()
        }
        "openrouter" => {
            let c: openrouter::Client<reqwest::Client> = openrouter::Client::from_val(value);
            c.boxed()
        }
        "anthropic" => {
            let c: anthropic::Client<reqwest::Client> = anthropic::Client::from_val(value);
            c.boxed()
        }
        "groq" => {
            let c: groq::Client<reqwest::Client> = groq::Client::from_val(value);
            c.boxed()
        }
        "mistral" => {
            let c: mistral::Client<reqwest::Client> = mistral::Client::from_val(value);
            c.boxed()
        }
        "deepseek" => {
            let c: deepseek::Client<reqwest::Client> = deepseek::Client::from_val(value);
            c.boxed()
        }
        "ollama" => {
            let c: ollama::Client<reqwest::Client> = ollama::Client::from_val(value);
            c.boxed()
        }
        other => return Err(anyhow::anyhow!("Unsupported provider: {other}")),
    };

    Ok(boxed)
}

pub fn create_completion_client(
    provider: &str,
    api_key: &str,
) -> Result<Box<dyn CompletionClientDyn>> {
    let boxed = create_provider_boxed(provider, api_key)?;
    boxed
        .as_completion()
        .context(format!("Provider '{provider}' does not support completions"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionFailure {
    /// The request never produced a usable HTTP exchange, or the provider refused it.
    #[error("{0}")]
    Transport(String),

    /// The provider answered, but the body could not be turned into a reply.
    #[error("{0}")]
    MalformedResponse(String),

    #[error("{0}")]
    InvalidRequest(String),
}

impl From<PromptError> for CompletionFailure {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::CompletionError(
                e @ (CompletionError::JsonError(_) | CompletionError::ResponseError(_)),
            ) => CompletionFailure::MalformedResponse(e.to_string()),
            other => CompletionFailure::Transport(other.to_string()),
        }
    }
}

/// One round trip to a chat-completion endpoint.
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, CompletionFailure>;
}

/// Splits role-tagged messages into (preamble, history, prompt).
///
/// System messages are joined into the preamble, the last user message is the
/// prompt, and everything between is history.
pub fn split_conversation(
    messages: &[ChatMessage],
) -> Result<(String, Vec<ChatMessage>, String), CompletionFailure> {
    let prompt_idx = messages
        .iter()
        .rposition(|m| m.role == Role::User)
        .ok_or_else(|| {
            CompletionFailure::InvalidRequest("Conversation has no user message".to_string())
        })?;

    let preamble = messages
        .iter()
        .filter(|m| m.role == Role::System)
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    let history = messages[..prompt_idx]
        .iter()
        .filter(|m| m.role != Role::System)
        .cloned()
        .collect();

    Ok((preamble, history, messages[prompt_idx].content.clone()))
}

/// [`Completer`] backed by a rig provider client, built per request.
pub struct RigCompleter {
    provider: String,
    api_key: String,
}

impl RigCompleter {
    pub fn new(provider: &str, api_key: &str) -> Result<Self> {
        create_completion_client(provider, api_key)?;
        Ok(Self {
            provider: provider.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl Completer for RigCompleter {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, CompletionFailure> {
        let (preamble, history, prompt) = split_conversation(messages)?;

        let history: Vec<Message> = history
            .into_iter()
            .map(|m| match m.role {
                Role::Assistant => Message::assistant(m.content),
                _ => Message::user(m.content),
            })
            .collect();

        let client = create_completion_client(&self.provider, &self.api_key)
            .map_err(|e| CompletionFailure::Transport(format!("{e:#}")))?;
        let agent = client.agent(model).preamble(&preamble).build();

        tracing::debug!(model, history = history.len(), "Sending completion request");

        let reply = agent.chat(prompt.as_str(), history).await?;

        if reply.trim().is_empty() {
            return Err(CompletionFailure::MalformedResponse(
                "Model returned an empty reply".to_string(),
            ));
        }

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_conversation() {
        let messages = vec![
            ChatMessage::system("be brief"),
            ChatMessage::user("first"),
            ChatMessage::assistant("reply"),
            ChatMessage::user("second"),
        ];

        let (preamble, history, prompt) = split_conversation(&messages).unwrap();
        assert_eq!(preamble, "be brief");
        assert_eq!(history, vec![ChatMessage::user("first"), ChatMessage::assistant("reply")]);
        assert_eq!(prompt, "second");
    }

    #[test]
    fn test_split_conversation_requires_user_message() {
        let err = split_conversation(&[ChatMessage::system("only system")]).unwrap_err();
        assert!(matches!(err, CompletionFailure::InvalidRequest(_)));
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        assert!(create_completion_client("carrier-pigeon", "key").is_err());
    }

    #[test]
    fn test_response_errors_are_malformed() {
        let err = PromptError::CompletionError(CompletionError::ResponseError(
            "no choices".to_string(),
        ));
        assert!(matches!(
            CompletionFailure::from(err),
            CompletionFailure::MalformedResponse(_)
        ));

        let err = PromptError::CompletionError(CompletionError::ProviderError(
            "401 unauthorized".to_string(),
        ));
        assert!(matches!(
            CompletionFailure::from(err),
            CompletionFailure::Transport(_)
        ));
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatMessage::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }
}
