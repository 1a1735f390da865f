use async_openai::error::OpenAIError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Json error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Openai error: {0}")]
    OpenaiError(#[from] OpenAIError),

    #[error("No response from llm: {0}")]
    LLMResponseError(String),

    #[error("Http error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Tool registry error: {0}")]
    ToolRegistryError(String),

    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),
}
