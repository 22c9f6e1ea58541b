use std::sync::Arc;

use log::{debug, warn};

use super::models::{AIError, AIProvider, ChatRequest};
use crate::config::DEFAULT_TEMPERATURE;

pub const SYSTEM_PROMPT: &str =
    "You are a helpful AI that writes professional, human-like responses.";

/// Marker that opens every rendered failure.
pub const ERROR_MARKER: &str = "API Error:";

pub const EMPTY_INPUT_WARNING: &str = "Please enter some text first.";

/// Input guard used by the interactive surfaces before calling the drafter.
pub fn has_content(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Drafts friendly, professional replies to reviews and emails.
pub struct ResponseDrafter {
    provider: Arc<dyn AIProvider>,
    temperature: f32,
}

impl ResponseDrafter {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self {
            provider,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn build_request(&self, text: &str) -> ChatRequest {
        ChatRequest::new(format!("Write a friendly and professional reply to:\n\n{}", text))
            .with_system_prompt(SYSTEM_PROMPT)
            .with_temperature(self.temperature)
    }

    /// Makes exactly one call to the provider. The text is not re-checked
    /// here; see [`has_content`].
    pub async fn draft(&self, text: &str) -> Result<String, AIError> {
        debug!("Drafting reply for {} chars of input", text.len());
        let result = self.provider.generate_response(&self.build_request(text)).await;
        if let Err(e) = &result {
            warn!("Drafting failed: {}", e);
        }
        result
    }

    pub async fn draft_outcome(&self, text: &str) -> DraftOutcome {
        self.draft(text).await.into()
    }
}

#[derive(Debug)]
pub enum DraftOutcome {
    Reply(String),
    Failed(AIError),
}

impl DraftOutcome {
    pub fn is_reply(&self) -> bool {
        matches!(self, DraftOutcome::Reply(_))
    }

    /// Text for a manual-inspection surface: the reply itself, or the error
    /// behind [`ERROR_MARKER`].
    pub fn display_text(&self) -> String {
        match self {
            DraftOutcome::Reply(reply) => reply.clone(),
            DraftOutcome::Failed(e) => format!("❌ {} {}", ERROR_MARKER, e),
        }
    }
}

impl From<Result<String, AIError>> for DraftOutcome {
    fn from(result: Result<String, AIError>) -> Self {
        match result {
            Ok(reply) => DraftOutcome::Reply(reply),
            Err(e) => DraftOutcome::Failed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingProvider {
        seen: Mutex<Vec<ChatRequest>>,
        reply: fn() -> Result<String, AIError>,
    }

    impl RecordingProvider {
        fn new(reply: fn() -> Result<String, AIError>) -> Arc<Self> {
            Arc::new(Self {
                seen: Mutex::new(Vec::new()),
                reply,
            })
        }
    }

    #[async_trait]
    impl AIProvider for RecordingProvider {
        async fn generate_response(&self, request: &ChatRequest) -> Result<String, AIError> {
            self.seen.lock().unwrap().push(request.clone());
            (self.reply)()
        }
    }

    #[tokio::test]
    async fn reply_is_returned_unaltered() {
        let provider = RecordingProvider::new(|| Ok("  Thanks so much!\n".to_string()));
        let drafter = ResponseDrafter::new(provider.clone());
        assert_eq!(drafter.temperature(), DEFAULT_TEMPERATURE);

        let reply = drafter.draft("Great service").await.unwrap();
        assert_eq!(reply, "  Thanks so much!\n");

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].system_prompt.as_deref(), Some(SYSTEM_PROMPT));
        assert_eq!(
            seen[0].prompt,
            "Write a friendly and professional reply to:\n\nGreat service"
        );
        assert_eq!(seen[0].temperature, Some(0.8));
    }

    #[tokio::test]
    async fn temperature_can_be_overridden() {
        let provider = RecordingProvider::new(|| Ok("ok".to_string()));
        let drafter = ResponseDrafter::new(provider.clone()).with_temperature(0.2);
        assert_eq!(drafter.temperature(), 0.2);
        drafter.draft("hello").await.unwrap();
        assert_eq!(provider.seen.lock().unwrap()[0].temperature, Some(0.2));
    }

    #[tokio::test]
    async fn auth_failure_renders_with_marker() {
        let provider = RecordingProvider::new(|| {
            Err(AIError::APIError {
                status: 401,
                message: "Incorrect API key provided".to_string(),
            })
        });
        let drafter = ResponseDrafter::new(provider);

        let outcome = drafter.draft_outcome("hello").await;
        assert!(!outcome.is_reply());
        let text = outcome.display_text();
        assert!(text.contains("API Error:"), "{text}");
        assert!(text.contains("Incorrect API key provided"), "{text}");
        assert!(matches!(outcome, DraftOutcome::Failed(ref e) if e.is_auth_failure()));
    }

    #[tokio::test]
    async fn reply_display_is_the_reply() {
        let provider = RecordingProvider::new(|| Ok("Dear customer".to_string()));
        let outcome = ResponseDrafter::new(provider).draft_outcome("hi").await;
        assert!(outcome.is_reply());
        assert_eq!(outcome.display_text(), "Dear customer");
    }

    #[test]
    fn blank_text_has_no_content() {
        assert!(!has_content(""));
        assert!(!has_content("  \n\t"));
        assert!(has_content(" hi "));
    }
}
