use crate::Result;
use async_trait::async_trait;

mod openai;
pub use openai::OpenAI;

/// Boundary to the remote text-generation service: one instruction
/// string in, one generated text out. No retries, no timeouts; an
/// error aborts the caller's in-progress action. Responses are not
/// deterministic between identical calls.
#[async_trait]
pub trait TextModel {
    async fn generate(&self, instruction: &str) -> Result<String>;
}
