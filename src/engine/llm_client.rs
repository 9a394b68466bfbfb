use std::fs;

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Connection settings for the chat-completions backend.
/// Persisted as part of the app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,

    /// Path to a file holding the API key. Empty means no Authorization
    /// header (local backends such as LM Studio need none).
    pub api_key_file: String,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:1234/v1".into(),
            model: "local-model".into(),
            temperature: 0.7,
            max_tokens: 300,
            api_key_file: String::new(),
        }
    }
}

#[derive(Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".into(),
            content: content.into(),
        }
    }
}

#[derive(Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Deserialize)]
pub struct Choice {
    pub message: ChatMessageResponse,
}

#[derive(Deserialize)]
pub struct ChatMessageResponse {
    pub content: String,
}

pub struct LlmClient {
    client: Client,
    settings: BackendSettings,
}

impl LlmClient {
    pub fn new(settings: BackendSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    pub fn set_settings(&mut self, settings: BackendSettings) {
        self.settings = settings;
    }

    /// Send the message list and return the narrator's reply text.
    pub fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let req = ChatCompletionRequest {
            model: self.settings.model.clone(),
            messages,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let url = format!("{}/chat/completions", self.settings.base_url.trim_end_matches('/'));
        debug!(%url, model = %req.model, "sending chat completion request");

        let mut request = self.client.post(&url).json(&req);
        if let Some(key) = self.api_key()? {
            request = request.bearer_auth(key);
        }

        let resp = request.send().context("request to LLM backend failed")?;

        let status = resp.status();
        if !status.is_success() {
            bail!("LLM backend returned HTTP {}", status);
        }

        let resp: ChatCompletionResponse = resp
            .json()
            .context("LLM backend returned an unreadable response")?;

        let choice = resp
            .choices
            .into_iter()
            .next()
            .context("LLM backend returned no choices")?;

        Ok(choice.message.content)
    }

    /// Probe the backend's model listing endpoint.
    pub fn test_connection(&self) -> Result<String> {
        let url = format!("{}/models", self.settings.base_url.trim_end_matches('/'));

        let mut request = self.client.get(&url);
        if let Some(key) = self.api_key()? {
            request = request.bearer_auth(key);
        }

        let resp: serde_json::Value = request
            .send()
            .context("request to LLM backend failed")?
            .json()
            .context("model listing was not valid JSON")?;

        Ok(format!(
            "Connected ({} models available)",
            resp["data"].as_array().map(|a| a.len()).unwrap_or(0)
        ))
    }

    fn api_key(&self) -> Result<Option<String>> {
        let path = self.settings.api_key_file.trim();
        if path.is_empty() {
            return Ok(None);
        }

        let key = fs::read_to_string(path)
            .with_context(|| format!("could not read API key file {path}"))?;
        let key = key.trim();
        if key.is_empty() {
            bail!("API key file {path} is empty");
        }

        Ok(Some(key.to_string()))
    }
}
