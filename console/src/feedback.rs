use assistant::llm::TextModel;
use assistant::{PromptTemplate, Result};
use std::sync::Arc;
use tracing::info;

const FEEDBACK_PROMPT: &str = include_str!("prompts/feedback.md");

/// Forwards free-text feedback to the model collaborator and returns
/// its acknowledgment. The 1-5 rating is display-only; it never
/// leaves the console.
pub struct FeedbackSink {
    model: Arc<dyn TextModel + Send + Sync>,
}

impl FeedbackSink {
    pub fn new(model: Arc<dyn TextModel + Send + Sync>) -> Self {
        Self { model }
    }

    pub async fn submit(&self, feedback: &str) -> Result<String> {
        info!("submitting feedback");

        let rendered = PromptTemplate::new(FEEDBACK_PROMPT).render(&[("feedback", feedback)])?;
        self.model.generate(&rendered).await
    }
}

pub fn stars(rating: u8) -> String {
    "⭐".repeat(rating.clamp(1, 5) as usize)
}
