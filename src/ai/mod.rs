mod models;
mod openai;
mod drafter;

pub use models::{AIProvider, AIError, ChatRequest};
pub use openai::OpenAIProvider;
pub use drafter::{
    has_content, DraftOutcome, ResponseDrafter, EMPTY_INPUT_WARNING, ERROR_MARKER, SYSTEM_PROMPT,
};
