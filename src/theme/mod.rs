//! Theme system for human-mode output.

use console::Style;

/// Visual theme for the interactive menu.
///
/// Centralizes colors and styles for consistent rendering.
#[derive(Debug, Clone)]
pub struct XcmTheme {
    pub success: Style,
    pub error: Style,
    pub warning: Style,
    pub info: Style,
    pub muted: Style,

    pub header: Style,
    pub label: Style,
    pub value: Style,
    pub option_index: Style,
    pub path: Style,
}

impl Default for XcmTheme {
    fn default() -> Self {
        Self {
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warning: Style::new().yellow().bold(),
            info: Style::new().cyan(),
            muted: Style::new().dim(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold(),
            option_index: Style::new().yellow().bold(),
            path: Style::new().italic().dim(),
        }
    }
}

impl XcmTheme {
    /// Presence marker used in the status panel.
    pub fn presence(&self, present: bool) -> String {
        if present {
            self.success.apply_to("✓").to_string()
        } else {
            self.error.apply_to("✗").to_string()
        }
    }
}
