//! Generation client
//!
//! This module wraps the single outbound call to the generative completion
//! provider (Gemini `generateContent`). One request per invocation, no
//! retries; the orchestrator decides what a failure means. The credential is
//! injected explicitly rather than read ambiently, so callers and tests
//! control its presence deterministically.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;

use crate::error::CoachError;

/// Fixed model identifier used for all completion calls
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Public generateContent endpoint root
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the generation client
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Provider credential; `None` or empty means misconfigured
    pub api_key: Option<String>,
    /// Model identifier appended to the endpoint
    pub model: String,
    /// Endpoint root, overridable for tests
    pub endpoint: String,
    /// Request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GenerationConfig {
    /// Config with an explicit credential and default model/endpoint
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            ..Self::default()
        }
    }

    /// Read the credential from `GEMINI_API_KEY`; empty counts as absent
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self::new(api_key)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Single-shot completion provider seam.
///
/// The orchestrator talks to this trait so tests can substitute canned or
/// failing providers without a network.
pub trait CompletionProvider: Send + Sync {
    /// Send a prompt and return the raw completion text
    fn complete(&self, prompt: &str) -> Result<String, CoachError>;
}

/// HTTP client for the Gemini generateContent endpoint
pub struct GenerationClient {
    config: GenerationConfig,
}

impl GenerationClient {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    /// Credential precondition, checked before any network I/O
    fn api_key(&self) -> Result<&str, CoachError> {
        match self.config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => {
                log::error!("generation credential is not configured");
                Err(CoachError::Configuration(
                    "GEMINI_API_KEY is not configured".to_string(),
                ))
            }
        }
    }
}

impl CompletionProvider for GenerationClient {
    /// Missing credential fails with `Configuration` before any network
    /// call; every other failure is `Upstream`.
    fn complete(&self, prompt: &str) -> Result<String, CoachError> {
        let api_key = self.api_key()?;

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model,
            api_key
        );

        let payload = serde_json::json!({
            "contents": [
                {
                    "parts": [
                        {"text": prompt}
                    ]
                }
            ]
        });

        log::debug!(
            "sending completion request (model {}, prompt {} chars)",
            self.config.model,
            prompt.len()
        );

        let http = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()?;
        let response = http.post(&url).json(&payload).send()?;

        if !response.status().is_success() {
            let status = response.status();
            let body = match response.text() {
                Ok(text) => text,
                Err(e) => format!("unreadable error body: {e}"),
            };
            log::error!("completion call failed with status {status}");
            return Err(CoachError::Upstream(format!(
                "completion call failed with status {status}: {body}"
            )));
        }

        let json: Value = response.json()?;
        let text = json
            .get("candidates")
            .and_then(Value::as_array)
            .and_then(|candidates| candidates.first())
            .and_then(|candidate| candidate.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(Value::as_array)
            .and_then(|parts| parts.first())
            .and_then(|part| part.get("text"))
            .and_then(Value::as_str)
            .map(str::trim)
            .ok_or_else(|| {
                CoachError::Upstream("completion response missing candidate text".to_string())
            })?;

        if text.is_empty() {
            return Err(CoachError::Upstream(
                "completion response was empty".to_string(),
            ));
        }

        log::debug!("received completion ({} chars)", text.len());
        Ok(text.to_string())
    }
}
