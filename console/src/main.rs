mod export;
mod feedback;
mod workflow;

use assistant::news::NewsSections;
use assistant::tools::{ToolDescriptor, ToolRegistry};
use assistant::{Result, SessionState};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser)]
#[command(about = "Interactive AI research assistant and summarizer")]
struct Args {
    /// Chat model used for every generation flow
    #[arg(long, env = "ASSISTANT_MODEL", default_value = "gpt-4o")]
    model: String,

    /// MCP tool-serving endpoint, contacted once at startup
    #[arg(long, env = "MCP_URL", default_value = "http://localhost:8000/mcp")]
    mcp_url: String,

    /// Directory for exported reports
    #[arg(long, env = "REPORTS_DIR", default_value = "reports")]
    reports_dir: PathBuf,

    /// Shared-secret login email; when unset the login gate is skipped
    #[arg(long, env = "ALLOWED_EMAIL")]
    allowed_email: Option<String>,
}

#[derive(Debug, PartialEq)]
enum Panel {
    Report,
    Summary,
    News,
    Chat,
    Tools,
}

#[derive(Debug, PartialEq)]
enum Command {
    Report(String),
    News(String),
    Summary,
    Ask(String),
    Feedback(String),
    Show(Panel),
    Clear,
    Help,
    Quit,
}

impl Command {
    // None means blank or unrecognized; the loop answers with help.
    fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(word, rest)| (word, rest.trim()))
            .unwrap_or((line, ""));

        match (word, rest) {
            ("report", topic) if !topic.is_empty() => Some(Command::Report(topic.to_string())),
            ("news", topic) if !topic.is_empty() => Some(Command::News(topic.to_string())),
            ("summary", "") => Some(Command::Summary),
            ("ask", question) if !question.is_empty() => Some(Command::Ask(question.to_string())),
            ("feedback", text) if !text.is_empty() => Some(Command::Feedback(text.to_string())),
            ("show", "report") => Some(Command::Show(Panel::Report)),
            ("show", "summary") => Some(Command::Show(Panel::Summary)),
            ("show", "news") => Some(Command::Show(Panel::News)),
            ("show", "chat") => Some(Command::Show(Panel::Chat)),
            ("show", "tools") => Some(Command::Show(Panel::Tools)),
            ("clear", "") => Some(Command::Clear),
            ("help", _) => Some(Command::Help),
            ("quit" | "exit", "") => Some(Command::Quit),
            _ => None,
        }
    }
}

const HELP: &str = "\
Commands:
  report <topic>      generate a detailed report (also fetches news and merges)
  news <topic>        fetch the latest news on a topic
  summary             summarize the stored report
  ask <question>      ask the QnA agent
  show <panel>        display report | summary | news | chat | tools
  clear               clear the chat transcript
  feedback <text>     send feedback (you will be asked for a 1-5 rating)
  quit                exit";

fn prompt_line(prompt: &str, input: &mut impl BufRead) -> Result<Option<String>> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Single shared-secret login: the entered email must match the
/// configured one exactly (case-sensitive). Reprompts until it does.
/// Returns false only on end of input.
fn authenticate(
    session: &mut SessionState,
    allowed_email: Option<&str>,
    input: &mut impl BufRead,
) -> Result<bool> {
    let Some(allowed) = allowed_email else {
        session.authenticated = true;
        return Ok(true);
    };

    loop {
        match prompt_line("Enter your email: ", input)? {
            None => return Ok(false),
            Some(email) if email == allowed => {
                session.authenticated = true;
                println!("Logged in.");
                return Ok(true);
            }
            Some(_) => println!("Invalid email"),
        }
    }
}

fn show_panel(panel: &Panel, session: &SessionState, tools: &[ToolDescriptor]) {
    match panel {
        Panel::Report if session.report.is_empty() => {
            println!("Generate a detailed report to see it here.")
        }
        Panel::Report => println!("{}", session.report),
        Panel::Summary if session.summary.is_empty() => {
            println!("Generate a summary to see it here.")
        }
        Panel::Summary => println!("{}", session.summary),
        Panel::News if session.news.is_empty() => println!("Fetch news to see it here."),
        Panel::News => {
            let sections = NewsSections::parse(&session.news);
            println!("Summary: {}", sections.summary_text());
            println!("Key Details:");
            for detail in sections.detail_items() {
                println!("- {}", detail);
            }
            println!("Sources:");
            for source in sections.source_items() {
                println!("- {}", source);
            }
        }
        Panel::Chat if session.chat_history.is_empty() => println!("No chat history yet."),
        Panel::Chat => {
            for entry in &session.chat_history {
                println!("{}", entry);
            }
        }
        Panel::Tools => {
            for tool in tools {
                println!("- {}: {}", tool.name, tool.description.as_deref().unwrap_or(""));
            }
        }
    }
}

async fn run(
    orchestrator: workflow::Orchestrator,
    sink: feedback::FeedbackSink,
    tools: Vec<ToolDescriptor>,
    reports_dir: PathBuf,
    session: &mut SessionState,
    input: &mut impl BufRead,
) -> Result<()> {
    println!("{}", HELP);

    // Strictly sequential: each action runs its full call chain before
    // the next command is read.
    loop {
        let Some(line) = prompt_line("> ", input)? else {
            return Ok(());
        };
        let Some(command) = Command::parse(&line) else {
            if !line.is_empty() {
                println!("{}", HELP);
            }
            continue;
        };

        match command {
            Command::Report(topic) => {
                let generated = orchestrator.generate_report(session, &topic).await;
                let result = generated
                    .and_then(|()| export::write_report(&reports_dir, &topic, &session.report));
                match result {
                    Ok(path) => println!("Detailed report generated! Saved to {}", path.display()),
                    Err(err) => warn!(error = %err, "report flow failed"),
                }
            }
            Command::News(topic) => match orchestrator.fetch_news(session, &topic).await {
                Ok(()) => println!("Latest news fetched!"),
                Err(err) => warn!(error = %err, "news flow failed"),
            },
            Command::Summary => {
                let had_report = session.has_report();
                match orchestrator.generate_summary(session).await {
                    Ok(()) if had_report => println!("Summary generated!"),
                    Ok(()) => {}
                    Err(err) => warn!(error = %err, "summary flow failed"),
                }
            }
            Command::Ask(question) => {
                match orchestrator.answer_question(session, &question).await {
                    Ok(answer) => println!("AI: {}", answer),
                    Err(err) => warn!(error = %err, "qna flow failed"),
                }
            }
            Command::Feedback(text) => {
                let rating = prompt_line("Rate this AI Assistant (1-5): ", input)?
                    .and_then(|line| line.parse().ok())
                    .unwrap_or(5);
                match sink.submit(&text).await {
                    Ok(response) => {
                        println!("Feedback submitted!");
                        println!("AI Response: {}", response);
                        println!("Rating: {}", feedback::stars(rating));
                    }
                    Err(err) => warn!(error = %err, "feedback failed"),
                }
            }
            Command::Show(panel) => show_panel(&panel, session, &tools),
            Command::Clear => session.clear_chat(),
            Command::Help => println!("{}", HELP),
            Command::Quit => return Ok(()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Tool discovery happens once, before the console is interactive.
    let mut registry = ToolRegistry::connect(&args.mcp_url).await?;
    let tools = registry.tools().await?;

    let model = assistant::llm::OpenAI::new(args.model.clone());
    let orchestrator = workflow::Orchestrator::new(model.clone());
    let sink = feedback::FeedbackSink::new(model);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();

    let mut session = SessionState::new();
    if !authenticate(&mut session, args.allowed_email.as_deref(), &mut input)? {
        return Ok(());
    }

    run(orchestrator, sink, tools, args.reports_dir, &mut session, &mut input).await
}
