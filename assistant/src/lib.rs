mod error;
pub mod llm;
pub mod news;
pub mod prompt;
pub mod session;
pub mod tools;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

pub use prompt::PromptTemplate;
pub use session::{ChatEntry, SessionState};
