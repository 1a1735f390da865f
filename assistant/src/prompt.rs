use crate::{Error, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

// unwrap: pattern is a compile-time constant
static SLOT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([a-z][a-z0-9_]*)\}").unwrap());

/// A fixed text skeleton with named `{slot}` placeholders. Rendering
/// requires exactly the named values and produces one string that is
/// passed verbatim to the model.
pub struct PromptTemplate {
    template: String,
    slots: Vec<String>,
}

impl PromptTemplate {
    pub fn new(template: &str) -> Self {
        let mut slots = Vec::new();
        for capture in SLOT.captures_iter(template) {
            let name = capture[1].to_string();
            if !slots.contains(&name) {
                slots.push(name);
            }
        }
        Self {
            template: template.to_string(),
            slots,
        }
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn render(&self, values: &[(&str, &str)]) -> Result<String> {
        let values: HashMap<&str, &str> = values.iter().copied().collect();

        for name in values.keys() {
            if !self.slots.iter().any(|slot| slot == name) {
                return Err(Error::TemplateError(format!(
                    "value {} does not match any slot",
                    name
                )));
            }
        }

        let mut rendered = self.template.clone();
        for slot in &self.slots {
            let value = values
                .get(slot.as_str())
                .ok_or(Error::TemplateError(format!("no value for slot {}", slot)))?;
            rendered = rendered.replace(&format!("{{{}}}", slot), value);
        }

        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::PromptTemplate;
    use crate::{Error, Result};

    #[test]
    fn test_render() -> Result<()> {
        let template = PromptTemplate::new("Report:\n{report}\n\nNews:\n{news}\n");
        assert_eq!(template.slots(), &["report", "news"]);

        let rendered = template.render(&[("news", "n1"), ("report", "r1")])?;
        assert_eq!(rendered, "Report:\nr1\n\nNews:\nn1\n");

        Ok(())
    }

    #[test]
    fn test_repeated_slot() -> Result<()> {
        let template = PromptTemplate::new("{topic} and again {topic}");
        let rendered = template.render(&[("topic", "rust")])?;
        assert_eq!(rendered, "rust and again rust");
        Ok(())
    }

    #[test]
    fn test_missing_value() {
        let template = PromptTemplate::new("{report} {news}");
        let err = template.render(&[("report", "r1")]).unwrap_err();
        assert!(matches!(err, Error::TemplateError(_)));
    }

    #[test]
    fn test_unknown_value() {
        let template = PromptTemplate::new("{report}");
        let err = template
            .render(&[("report", "r1"), ("extra", "x")])
            .unwrap_err();
        assert!(matches!(err, Error::TemplateError(_)));
    }

    #[test]
    fn test_no_slots() -> Result<()> {
        let template = PromptTemplate::new("fixed text");
        assert_eq!(template.render(&[])?, "fixed text");
        Ok(())
    }
}
