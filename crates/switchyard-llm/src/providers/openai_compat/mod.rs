//! OpenAI-compatible provider
//!
//! Calls `POST {base_url}/chat/completions` with the request input as a
//! single user message. Works against OpenAI and any endpoint speaking the
//! same wire format.

use super::{Deadline, Invocation, Provider, TokenUsage};
use crate::error::{Error, Result};
use crate::request::{InvokeRequest, Role};
use crate::util::{mask_api_key, sanitize_api_error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// OpenAI API base URL
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI-compatible provider configuration
#[derive(Clone)]
pub struct OpenAiCompatConfig {
    /// Provider name reported in response envelopes
    pub name: String,
    /// API key
    pub api_key: String,
    /// Base URL (without `/chat/completions`)
    pub base_url: String,
    /// Model
    pub model: String,
    /// Role tried when this provider fails (`claude` when unset)
    pub fallback: Option<Role>,
}

// SECURITY: Custom Debug implementation to mask API key
impl fmt::Debug for OpenAiCompatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiCompatConfig")
            .field("name", &self.name)
            .field("api_key", &mask_api_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl OpenAiCompatConfig {
    /// Create a configuration with the default endpoint and model
    #[must_use]
    pub fn new(name: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api_key: api_key.into(),
            base_url: OPENAI_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            fallback: None,
        }
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the fallback role
    #[must_use]
    pub fn with_fallback(mut self, fallback: Role) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

/// OpenAI-compatible chat completions provider
pub struct OpenAiCompatProvider {
    client: Client,
    config: OpenAiCompatConfig,
}

impl fmt::Debug for OpenAiCompatProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiCompatProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: Option<u64>,
    completion_tokens: Option<u64>,
    total_tokens: Option<u64>,
}

impl From<ChatUsage> for TokenUsage {
    fn from(u: ChatUsage) -> Self {
        Self {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        }
    }
}

impl OpenAiCompatProvider {
    /// Create a new provider
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiCompatConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Provider(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Provider configuration
    #[must_use]
    pub fn config(&self) -> &OpenAiCompatConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    async fn send(&self, request: &InvokeRequest, deadline: &Deadline) -> Result<Invocation> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: &request.input,
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .timeout(deadline.remaining())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout(u64::try_from(deadline.budget().as_millis()).unwrap_or(u64::MAX))
                } else {
                    Error::Network(sanitize_api_error(&e.to_string()))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let reason = match status.canonical_reason() {
                Some(phrase) => phrase.to_string(),
                None => sanitize_api_error(&response.text().await.unwrap_or_default()),
            };
            return Err(Error::Api {
                status: status.as_u16(),
                reason,
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))?;

        let usage = chat.usage.map(TokenUsage::from);
        let choice = chat
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidResponse("No choices in response".to_string()))?;

        Ok(Invocation {
            output: choice.message.content.unwrap_or_default(),
            usage,
        })
    }
}

#[async_trait::async_trait]
impl Provider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.config.name
    }

    #[instrument(skip(self, request, deadline), fields(provider = %self.config.name, model = %self.config.model))]
    async fn invoke(&self, request: &InvokeRequest, deadline: &Deadline) -> Result<Invocation> {
        debug!("Sending chat completion request");
        deadline.run(self.send(request, deadline)).await
    }

    fn fallback_role(&self) -> Option<Role> {
        self.config.fallback.or(Some(Role::Claude))
    }
}

#[cfg(test)]
mod tests;
