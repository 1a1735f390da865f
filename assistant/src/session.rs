/// One entry of the QnA transcript, in insertion order.
#[derive(Clone, Debug, PartialEq)]
pub enum ChatEntry {
    User(String),
    Bot(String),
}

impl std::fmt::Display for ChatEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatEntry::User(text) => write!(f, "You: {}", text),
            ChatEntry::Bot(text) => write!(f, "AI: {}", text),
        }
    }
}

/// State scoped to one interactive session, held only in memory.
/// Report, summary, and news are overwritten in place on each
/// regeneration; only the transcript can be cleared by the user.
#[derive(Default)]
pub struct SessionState {
    pub report: String,
    pub summary: String,
    pub news: String,
    pub chat_history: Vec<ChatEntry>,
    pub authenticated: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_report(&self) -> bool {
        !self.report.is_empty()
    }

    pub fn clear_chat(&mut self) {
        self.chat_history.clear();
    }

    /// Transcript as alternating `You:`/`AI:` lines, for the QnA prompt
    /// and for display.
    pub fn transcript(&self) -> String {
        let mut out = String::new();
        for entry in &self.chat_history {
            out.push_str(&entry.to_string());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{ChatEntry, SessionState};

    #[test]
    fn test_clear_chat_leaves_documents() {
        let mut session = SessionState::new();
        session.report = "r".to_string();
        session.summary = "s".to_string();
        session.news = "n".to_string();
        session.chat_history.push(ChatEntry::User("q".to_string()));
        session.chat_history.push(ChatEntry::Bot("a".to_string()));

        session.clear_chat();

        assert!(session.chat_history.is_empty());
        assert_eq!(session.report, "r");
        assert_eq!(session.summary, "s");
        assert_eq!(session.news, "n");
    }

    #[test]
    fn test_transcript_format() {
        let mut session = SessionState::new();
        session
            .chat_history
            .push(ChatEntry::User("what is rust".to_string()));
        session
            .chat_history
            .push(ChatEntry::Bot("a language".to_string()));

        assert_eq!(session.transcript(), "You: what is rust\nAI: a language\n");
    }
}
