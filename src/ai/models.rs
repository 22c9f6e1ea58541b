use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AIError {
    #[error("request failed: {0}")]
    NetworkError(String),

    #[error("status {status}: {message}")]
    APIError { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl AIError {
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AIError::APIError { status: 401 | 403, .. })
    }
}

/// One chat-completion call: an optional system instruction, the user
/// prompt, and an optional sampling temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system_prompt: Option<String>,
    pub prompt: String,
    pub temperature: Option<f32>,
}

impl ChatRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: None,
            prompt: prompt.into(),
            temperature: None,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Returns the text of the first generated candidate.
    async fn generate_response(&self, request: &ChatRequest) -> Result<String, AIError>;
}
