use assistant::llm::TextModel;
use assistant::{ChatEntry, PromptTemplate, Result, SessionState};
use std::sync::Arc;
use tracing::info;

const REPORT_PROMPT: &str = include_str!("prompts/report.md");
const NEWS_PROMPT: &str = include_str!("prompts/news.md");
const SUMMARY_PROMPT: &str = include_str!("prompts/summary.md");
const MERGE_PROMPT: &str = include_str!("prompts/merge.md");
const QNA_PROMPT: &str = include_str!("prompts/qna.md");

/// Sequences the report, news, summary, merge, and QnA flows over the
/// model gateway. Each flow runs to completion before the next user
/// action is read; a gateway failure aborts the flow and leaves the
/// session as the last successful step left it.
pub struct Orchestrator {
    model: Arc<dyn TextModel + Send + Sync>,
}

impl Orchestrator {
    pub fn new(model: Arc<dyn TextModel + Send + Sync>) -> Self {
        Self { model }
    }

    async fn prompt(&self, template: &str, values: &[(&str, &str)]) -> Result<String> {
        let rendered = PromptTemplate::new(template).render(values)?;
        self.model.generate(&rendered).await
    }

    /// The report flow always performs a news fetch and a merge step,
    /// even for a report-only request. The merged document overwrites
    /// `report` and the raw news text overwrites `news`.
    pub async fn generate_report(&self, session: &mut SessionState, topic: &str) -> Result<()> {
        info!(topic, "generating report");

        let report = self.prompt(REPORT_PROMPT, &[("topic", topic)]).await?;
        let news = self.prompt(NEWS_PROMPT, &[("topic", topic)]).await?;
        let merged = self
            .prompt(MERGE_PROMPT, &[("report", &report), ("news", &news)])
            .await?;

        session.report = merged;
        session.news = news;
        Ok(())
    }

    /// Silent no-op until a report exists.
    pub async fn generate_summary(&self, session: &mut SessionState) -> Result<()> {
        if !session.has_report() {
            return Ok(());
        }

        info!("generating summary");

        let content = session.report.clone();
        session.summary = self.prompt(SUMMARY_PROMPT, &[("content", &content)]).await?;
        Ok(())
    }

    pub async fn fetch_news(&self, session: &mut SessionState, topic: &str) -> Result<()> {
        info!(topic, "fetching news");

        session.news = self.prompt(NEWS_PROMPT, &[("topic", topic)]).await?;
        Ok(())
    }

    /// Appends the question, asks the model with the stored report as
    /// context and the transcript so far, then appends the answer. The
    /// template instructs the model to fall back to its own knowledge,
    /// so a question always gets an answer.
    pub async fn answer_question(
        &self,
        session: &mut SessionState,
        question: &str,
    ) -> Result<String> {
        session.chat_history.push(ChatEntry::User(question.to_string()));

        let answer = self
            .prompt(
                QNA_PROMPT,
                &[
                    ("report", &session.report),
                    ("question", question),
                    ("chat_history", &session.transcript()),
                ],
            )
            .await?;

        session.chat_history.push(ChatEntry::Bot(answer.clone()));
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::Orchestrator;
    use assistant::llm::TextModel;
    use assistant::{ChatEntry, Result, SessionState};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    // Answers each prompt with a fixed string keyed on the prompt's
    // wording and records the prompts it saw.
    struct MockModel {
        prompts: Mutex<Vec<String>>,
    }

    impl MockModel {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextModel for MockModel {
        async fn generate(&self, instruction: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(instruction.to_string());

            let response = if instruction.starts_with("Research and create a detailed report") {
                "RAW REPORT"
            } else if instruction.starts_with("Get latest news") {
                "**Summary:** S **Key Details:** * A **Sources:** * X"
            } else if instruction.starts_with("You are an expert research and synthesis agent") {
                "MERGED REPORT"
            } else if instruction.starts_with("Summarize this content") {
                "SUMMARY"
            } else {
                "ANSWER"
            };

            Ok(response.to_string())
        }
    }

    #[tokio::test]
    async fn test_report_flow_stores_merged_report_and_news() -> Result<()> {
        let model = MockModel::new();
        let orchestrator = Orchestrator::new(model.clone());
        let mut session = SessionState::new();

        orchestrator.generate_report(&mut session, "rust").await?;

        assert_eq!(session.report, "MERGED REPORT");
        assert_eq!(
            session.news,
            "**Summary:** S **Key Details:** * A **Sources:** * X"
        );

        // Three gateway calls: report, news, merge, in that order.
        let prompts = model.seen();
        assert_eq!(prompts.len(), 3);
        assert!(prompts[0].contains("detailed report on rust"));
        assert!(prompts[1].contains("latest news on rust"));
        assert!(prompts[2].contains("RAW REPORT"));
        assert!(prompts[2].contains("**Summary:** S"));

        Ok(())
    }

    #[tokio::test]
    async fn test_summary_flow_requires_report() -> Result<()> {
        let model = MockModel::new();
        let orchestrator = Orchestrator::new(model.clone());
        let mut session = SessionState::new();

        orchestrator.generate_summary(&mut session).await?;

        assert_eq!(session.summary, "");
        assert!(model.seen().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_summary_flow_summarizes_report() -> Result<()> {
        let model = MockModel::new();
        let orchestrator = Orchestrator::new(model.clone());
        let mut session = SessionState::new();
        session.report = "the report".to_string();

        orchestrator.generate_summary(&mut session).await?;

        assert_eq!(session.summary, "SUMMARY");
        assert!(model.seen()[0].contains("the report"));

        Ok(())
    }

    #[tokio::test]
    async fn test_news_flow_is_independent() -> Result<()> {
        let model = MockModel::new();
        let orchestrator = Orchestrator::new(model.clone());
        let mut session = SessionState::new();

        orchestrator.fetch_news(&mut session, "space").await?;

        assert!(session.news.starts_with("**Summary:**"));
        assert_eq!(session.report, "");
        assert_eq!(session.summary, "");

        Ok(())
    }

    #[tokio::test]
    async fn test_qna_appends_question_then_answer() -> Result<()> {
        let model = MockModel::new();
        let orchestrator = Orchestrator::new(model.clone());
        let mut session = SessionState::new();
        session
            .chat_history
            .push(ChatEntry::User("earlier".to_string()));
        session.chat_history.push(ChatEntry::Bot("sure".to_string()));

        let answer = orchestrator.answer_question(&mut session, "why").await?;

        assert_eq!(answer, "ANSWER");
        assert_eq!(session.chat_history.len(), 4);
        assert_eq!(session.chat_history[2], ChatEntry::User("why".to_string()));
        assert_eq!(session.chat_history[3], ChatEntry::Bot("ANSWER".to_string()));

        // The prompt carries the empty report, the question, and the
        // transcript including the question itself.
        let prompt = &model.seen()[0];
        assert!(prompt.contains("Question:\nwhy"));
        assert!(prompt.contains("You: earlier"));
        assert!(prompt.contains("You: why"));

        Ok(())
    }
}
