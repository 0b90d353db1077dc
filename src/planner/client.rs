use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::PlanError;
use crate::config::Config;

/// Anything that can turn a prompt into the model's raw reply text.
pub trait LlmClient {
    /// Sends `prompt` and returns the reply text. An empty string means the
    /// endpoint answered but carried no text.
    fn generate(&self, prompt: &str) -> Result<String, PlanError>;
}

/// Client for a Gemini-style `generateContent` endpoint.
pub struct GeminiClient {
    url: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl GeminiClient {
    /// Builds a client from configuration. Fails if no API key is configured.
    pub fn from_config(config: &Config) -> Result<Self, PlanError> {
        let api_key = config.require_api_key()?.to_string();
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PlanError::NetworkFailure(e.to_string()))?;
        Ok(Self {
            url: format!(
                "{}/v1beta/models/{}:generateContent",
                config.endpoint, config.model
            ),
            api_key,
            client,
        })
    }
}

/// Request body: `{ "contents": [{ "parts": [{ "text": ... }] }] }`.
#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl LlmClient for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, PlanError> {
        let body = GenerateRequest {
            contents: [Content { parts: [Part { text: prompt }] }],
        };
        debug!(url = %self.url, prompt_len = prompt.len(), "sending generation request");

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&body)
            .send()
            .map_err(|e| PlanError::NetworkFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(status = status.as_u16(), "generation endpoint returned an error");
            return Err(PlanError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        let raw = response
            .text()
            .map_err(|e| PlanError::NetworkFailure(e.to_string()))?;
        Ok(reply_text(&raw))
    }
}

/// Reads `candidates[0].content.parts[0].text`, or an empty string when the
/// body is not JSON or the path is absent.
pub fn reply_text(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(v) => v
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        Err(e) => {
            warn!(error = %e, "generation response is not JSON");
            String::new()
        }
    }
}

/// Returns a canned reply without touching the network.
pub struct MockLlmClient {
    response: Result<String, fn() -> PlanError>,
}

impl MockLlmClient {
    pub fn new(response: &str) -> Self {
        Self { response: Ok(response.to_string()) }
    }

    /// A client whose every call fails with the error `make` builds.
    pub fn failing(make: fn() -> PlanError) -> Self {
        Self { response: Err(make) }
    }
}

impl LlmClient for MockLlmClient {
    fn generate(&self, _prompt: &str) -> Result<String, PlanError> {
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(make) => Err(make()),
        }
    }
}
