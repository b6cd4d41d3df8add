//! Output abstraction for the interactive menu.
//!
//! Flows call these methods without knowing whether they end up styled on a
//! terminal or captured as plain text.

use std::path::Path;

use crate::error::XcmError;

pub mod human;
pub mod plain;

pub use human::HumanOutput;
pub use plain::PlainOutput;

/// Kind of message, mapped to a style and a marker by each implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    Warning,
    Info,
    Muted,
    Heading,
    Plain,
}

/// Presence of each snapshot role, shown above the main menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStatus {
    pub live_path: String,
    pub live_present: bool,
    pub backup_count: usize,
    pub saved_present: bool,
    pub mirror_present: bool,
}

/// Format a byte count as megabytes with two decimals.
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

/// Trait for all output operations.
pub trait Output {
    /// Emit one line of text in the given tone.
    fn line(&self, tone: Tone, text: &str);

    /// Marker shown for a present or missing role in the status panel.
    fn presence(&self, present: bool) -> String {
        if present { "yes" } else { "no" }.to_string()
    }

    fn success(&self, message: &str) {
        self.line(Tone::Success, message);
    }

    fn warning(&self, message: &str) {
        self.line(Tone::Warning, message);
    }

    fn info(&self, message: &str) {
        self.line(Tone::Info, message);
    }

    fn error(&self, error: &XcmError) {
        self.line(Tone::Error, &error.to_string());
        if let XcmError::EnvironmentUnsupported { reasons } = error {
            for reason in reasons {
                self.line(Tone::Muted, &format!("   - {reason}"));
            }
        }
        if let Some(suggestion) = error.suggestion() {
            self.line(Tone::Muted, &format!("   Hint: {suggestion}"));
        }
    }

    /// Indented `label: value` line under a previous message.
    fn detail(&self, label: &str, value: &str) {
        self.line(Tone::Plain, &format!("   {label}: {value}"));
    }

    fn size(&self, bytes: u64) {
        self.detail("Size", &format_size(bytes));
    }

    fn rule(&self) {
        self.line(Tone::Muted, &"-".repeat(30));
    }

    fn newline(&self) {
        self.line(Tone::Plain, "");
    }

    fn header(&self, title: &str) {
        let bar = "=".repeat(50);
        self.newline();
        self.line(Tone::Heading, &bar);
        self.line(Tone::Heading, title);
        self.line(Tone::Heading, &bar);
    }

    /// Numbered option list; entries are numbered from 1.
    fn options(&self, entries: &[String]) {
        for (i, entry) in entries.iter().enumerate() {
            self.line(Tone::Plain, &format!("  {}. {entry}", i + 1));
        }
    }

    fn status(&self, status: &StoreStatus) {
        self.line(
            Tone::Plain,
            &format!(
                "Configuration on your system: {}",
                self.presence(status.live_present)
            ),
        );
        self.line(Tone::Muted, &format!("Path: {}", status.live_path));
        self.line(
            Tone::Plain,
            &format!("Backups in this repo: {}", status.backup_count),
        );
        self.line(
            Tone::Plain,
            &format!(
                "Saved configuration in this repo: {}",
                self.presence(status.saved_present)
            ),
        );
        self.line(
            Tone::Plain,
            &format!(
                "Configurations available in this repo: {}",
                self.presence(status.mirror_present)
            ),
        );
    }

    fn path(&self, label: &str, path: &Path) {
        self.line(Tone::Muted, &format!("{label}: {}", path.display()));
    }
}

impl<T: Output + ?Sized> Output for &T {
    fn line(&self, tone: Tone, text: &str) {
        (**self).line(tone, text);
    }

    fn presence(&self, present: bool) -> String {
        (**self).presence(present)
    }

    fn options(&self, entries: &[String]) {
        (**self).options(entries);
    }

    fn detail(&self, label: &str, value: &str) {
        (**self).detail(label, value);
    }

    fn path(&self, label: &str, path: &Path) {
        (**self).path(label, path);
    }
}
