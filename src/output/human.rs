//! Styled terminal output using console.

use std::path::Path;

use console::Term;
use tracing::warn;

use crate::theme::XcmTheme;

use super::{Output, Tone};

/// Styled terminal output implementation for human users.
pub struct HumanOutput {
    term: Term,
    theme: XcmTheme,
}

impl HumanOutput {
    pub fn new(term: Term) -> Self {
        Self {
            term,
            theme: XcmTheme::default(),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Term::stdout())
    }
}

impl Output for HumanOutput {
    fn line(&self, tone: Tone, text: &str) {
        let rendered = match tone {
            Tone::Success => format!("{} {text}", self.theme.success.apply_to("✓")),
            Tone::Error => format!(
                "{} {}",
                self.theme.error.apply_to("✗"),
                self.theme.value.apply_to(text)
            ),
            Tone::Warning => format!("{} {text}", self.theme.warning.apply_to("⚠")),
            Tone::Info => self.theme.info.apply_to(text).to_string(),
            Tone::Muted => self.theme.muted.apply_to(text).to_string(),
            Tone::Heading => self.theme.header.apply_to(text).to_string(),
            Tone::Plain => text.to_string(),
        };
        if let Err(e) = self.term.write_line(&rendered) {
            warn!(error = %e, "Failed to write to terminal");
        }
    }

    fn presence(&self, present: bool) -> String {
        self.theme.presence(present)
    }

    fn options(&self, entries: &[String]) {
        for (i, entry) in entries.iter().enumerate() {
            let index = self.theme.option_index.apply_to(format!("{}.", i + 1));
            self.line(Tone::Plain, &format!("  {index} {entry}"));
        }
    }

    fn detail(&self, label: &str, value: &str) {
        self.line(
            Tone::Plain,
            &format!(
                "   {}: {}",
                self.theme.label.apply_to(label),
                self.theme.value.apply_to(value)
            ),
        );
    }

    fn path(&self, label: &str, path: &Path) {
        self.line(
            Tone::Plain,
            &format!(
                "{}: {}",
                self.theme.label.apply_to(label),
                self.theme.path.apply_to(path.display())
            ),
        );
    }
}
