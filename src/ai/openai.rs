use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::{json, Value};

use super::models::{AIError, AIProvider, ChatRequest};
use crate::config::{Config, DEFAULT_API_BASE_URL};

pub struct OpenAIProvider {
    api_key: Option<String>,
    base_url: String,
    model: String,
    client: Client,
}

impl OpenAIProvider {
    /// A missing key is allowed; the service then rejects each call and the
    /// rejection comes back as [`AIError::APIError`].
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            model: model.into(),
            client: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.openai_api_key.clone(), config.model.clone())
            .with_base_url(config.api_base_url.clone())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn request_body(&self, request: &ChatRequest) -> Value {
        let mut messages = Vec::new();

        if let Some(system_content) = &request.system_prompt {
            messages.push(json!({
                "role": "system",
                "content": system_content
            }));
        }

        messages.push(json!({
            "role": "user",
            "content": request.prompt
        }));

        let mut body = json!({
            "model": self.model,
            "messages": messages,
        });
        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }
        body
    }
}

/// Pulls `error.message` out of an OpenAI error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn generate_response(&self, request: &ChatRequest) -> Result<String, AIError> {
        debug!("Requesting completion from {} with model {}", self.endpoint(), self.model);

        let mut builder = self.client.post(self.endpoint()).json(&self.request_body(request));
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AIError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to get error text: {}", e));
            error!("OpenAI API error ({}): {}", status, error_text);
            return Err(AIError::APIError {
                status: status.as_u16(),
                message: error_message(&error_text),
            });
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| AIError::InvalidResponse(e.to_string()))?;

        response_json["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| AIError::InvalidResponse("No content in response".to_string()))
    }
}
