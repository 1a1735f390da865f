use crate::llm::TextModel;
use crate::{Error, Result};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;

pub struct OpenAI {
    model: String,
    client: Client<OpenAIConfig>,
}

impl OpenAI {
    pub fn new(model: String) -> std::sync::Arc<Self> {
        std::sync::Arc::new(Self {
            model,
            client: Client::new(),
        })
    }
}

#[async_trait]
impl TextModel for OpenAI {
    async fn generate(&self, instruction: &str) -> Result<String> {
        let completion = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessage {
                    content: ChatCompletionRequestUserMessageContent::Text(
                        instruction.to_string(),
                    ),
                    name: None,
                },
            )])
            .build()?;

        tracing::debug!(model = %self.model, chars = instruction.len(), "model request");

        let res = self.client.chat().create(completion).await?;

        if res.choices.is_empty() {
            return Err(Error::LLMResponseError("choices is empty".to_string()));
        }

        let content = res.choices[0]
            .message
            .content
            .as_ref()
            .ok_or(Error::LLMResponseError("content is empty".to_string()))?;

        Ok(content.clone())
    }
}
