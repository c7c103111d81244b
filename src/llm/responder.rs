//! Core `Responder` trait and `ChatCompletionsResponder` implementation.
//!
//! `ChatCompletionsResponder` calls any OpenAI-compatible
//! `/v1/chat/completions` endpoint with the whole conversation so far.
//! All connection details come from [`ApiConfig`]; nothing is hardcoded.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{ApiConfig, ResponderConfig};
use crate::conversation::ChatMessage;
use crate::llm::ModelId;

// ---------------------------------------------------------------------------
// ResponderError
// ---------------------------------------------------------------------------

/// Errors that can occur while asking the chat backend for a reply.
#[derive(Debug, Clone, Error)]
pub enum ResponderError {
    /// The model id is not one the backend (or this crate) knows.
    #[error("invalid model id: {0}")]
    InvalidModel(String),

    /// The credential was missing or rejected.
    #[error("authentication failed: {0}")]
    Unauthorized(String),

    /// Rate limit or billing quota exhausted.
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Any other non-success HTTP status.
    #[error("chat backend returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("chat request timed out")]
    Timeout,

    /// The HTTP response could not be parsed as expected JSON.
    #[error("failed to parse chat response: {0}")]
    Parse(String),

    /// The backend returned a response with no usable text content.
    #[error("chat backend returned an empty reply")]
    EmptyResponse,
}

impl From<reqwest::Error> for ResponderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ResponderError::Timeout
        } else {
            ResponderError::Request(e.to_string())
        }
    }
}

impl ResponderError {
    /// Map a non-success HTTP status to the matching variant.
    fn from_status(status: u16, body: String, model: ModelId) -> Self {
        match status {
            401 | 403 => ResponderError::Unauthorized(body),
            429 => ResponderError::QuotaExceeded(body),
            404 => ResponderError::InvalidModel(model.to_string()),
            _ if body.contains("model_not_found") => {
                ResponderError::InvalidModel(model.to_string())
            }
            _ => ResponderError::Upstream { status, body },
        }
    }
}

// ---------------------------------------------------------------------------
// Responder trait
// ---------------------------------------------------------------------------

/// Async trait for chat backends.
///
/// Implementors must send `messages` exactly as given: same order, same
/// roles, same content.  No reordering or deduplication.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, messages: &[ChatMessage], model: ModelId)
        -> Result<String, ResponderError>;
}

// ---------------------------------------------------------------------------
// ChatCompletionsResponder
// ---------------------------------------------------------------------------

/// Calls an OpenAI-compatible `/v1/chat/completions` endpoint.
pub struct ChatCompletionsResponder {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    temperature: f32,
}

impl ChatCompletionsResponder {
    /// Build a responder from application config.
    ///
    /// The HTTP client carries the per-request timeout from
    /// `api.timeout_secs`.
    pub fn from_config(api: &ApiConfig, responder: &ResponderConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(api.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            api_key: api.api_key.clone(),
            temperature: responder.temperature,
        }
    }

    fn request_body(&self, messages: &[ChatMessage], model: ModelId) -> serde_json::Value {
        serde_json::json!({
            "model":       model.as_str(),
            "messages":    messages,
            "stream":      false,
            "temperature": self.temperature,
        })
    }
}

#[async_trait]
impl Responder for ChatCompletionsResponder {
    /// The `Authorization: Bearer …` header is attached only when an API key
    /// is configured and non-empty; the key is passed through unchanged.
    async fn respond(
        &self,
        messages: &[ChatMessage],
        model: ModelId,
    ) -> Result<String, ResponderError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        log::debug!(
            "responder: POST {url} model={model} messages={}",
            messages.len()
        );

        let mut req = self.client.post(&url).json(&self.request_body(messages, model));

        let key = self.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResponderError::from_status(status.as_u16(), body, model));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ResponderError::Parse(e.to_string()))?;

        let reply = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(ResponderError::EmptyResponse)?
            .trim()
            .to_string();

        if reply.is_empty() {
            return Err(ResponderError::EmptyResponse);
        }

        Ok(reply)
    }
}

// ---------------------------------------------------------------------------
// MockResponder  (test-only)
// ---------------------------------------------------------------------------

/// Scripted test double that records every history it receives.
#[cfg(test)]
pub struct MockResponder {
    script: std::sync::Mutex<std::collections::VecDeque<Result<String, ResponderError>>>,
    repeat: Option<String>,
    requests: std::sync::Mutex<Vec<(Vec<ChatMessage>, ModelId)>>,
}

#[cfg(test)]
impl MockResponder {
    /// Always reply with `text`.
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            script: Default::default(),
            repeat: Some(text.into()),
            requests: Default::default(),
        }
    }

    /// Answer from `script` in order; once exhausted every call fails with
    /// `EmptyResponse`.
    pub fn scripted(script: Vec<Result<String, ResponderError>>) -> Self {
        Self {
            script: std::sync::Mutex::new(script.into()),
            repeat: None,
            requests: Default::default(),
        }
    }

    /// Fail the first call with `error`.
    pub fn err(error: ResponderError) -> Self {
        Self::scripted(vec![Err(error)])
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<(Vec<ChatMessage>, ModelId)> {
        self.requests.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl Responder for MockResponder {
    async fn respond(
        &self,
        messages: &[ChatMessage],
        model: ModelId,
    ) -> Result<String, ResponderError> {
        self.requests
            .lock()
            .unwrap()
            .push((messages.to_vec(), model));
        if let Some(next) = self.script.lock().unwrap().pop_front() {
            return next;
        }
        match &self.repeat {
            Some(text) => Ok(text.clone()),
            None => Err(ResponderError::EmptyResponse),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
