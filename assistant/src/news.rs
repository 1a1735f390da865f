use regex::Regex;
use std::sync::LazyLock;

const NO_SUMMARY: &str = "No summary available.";

// unwrap: patterns are compile-time constants
static SUMMARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\*\*Summary:\*\*(.*?)\*\*Key Details:\*\*").unwrap());
static DETAILS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\*\*Key Details:\*\*(.*?)\*\*Sources:\*\*").unwrap());
static SOURCES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\*\*Sources:\*\*(.*)").unwrap());
// An asterisk is a bullet delimiter only when set off by whitespace or
// a line edge; asterisks embedded in a word are emphasis and stay.
static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:^|\s)\*(?:\s|$)").unwrap());

/// Best-effort breakdown of a raw news document into its
/// `**Summary:**` / `**Key Details:**` / `**Sources:**` regions. Each
/// section is matched independently; a missing marker yields `None`
/// for that section rather than failing the parse. The result is used
/// for display only and never persisted.
pub struct NewsSections {
    pub summary: Option<String>,
    pub details: Option<Vec<String>>,
    pub sources: Option<Vec<String>>,
}

fn section(raw: &str, re: &Regex) -> Option<String> {
    re.captures(raw)
        .map(|capture| capture[1].trim().to_string())
}

// Lines of a bulleted region, trimmed of bullet markers and
// whitespace, blanks discarded.
fn items(region: &str) -> Vec<String> {
    region
        .lines()
        .flat_map(|line| BULLET.split(line))
        .map(|item| item.trim_matches(|c: char| c == '-' || c.is_whitespace()))
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl NewsSections {
    pub fn parse(raw: &str) -> Self {
        Self {
            summary: section(raw, &SUMMARY),
            details: section(raw, &DETAILS).map(|region| items(&region)),
            sources: section(raw, &SOURCES).map(|region| items(&region)),
        }
    }

    pub fn summary_text(&self) -> &str {
        self.summary.as_deref().unwrap_or(NO_SUMMARY)
    }

    pub fn detail_items(&self) -> &[String] {
        self.details.as_deref().unwrap_or(&[])
    }

    pub fn source_items(&self) -> &[String] {
        self.sources.as_deref().unwrap_or(&[])
    }
}
