//! Line-based user interaction.
//!
//! Every confirmation and menu selection goes through [`Prompter`], so the
//! snapshot store and the session state machine can be driven by scripted
//! answers in tests.

pub mod mock;

use std::io::{self, BufRead, Write};

use console::style;
use tracing::trace;

use crate::error::{Result, XcmError};

/// Answers accepted as "yes". Spanish `s`/`si` are kept for existing users.
const YES_ANSWERS: &[&str] = &["y", "yes", "s", "si", "sí"];

/// Interpret a confirmation answer. Empty input picks `default`.
pub fn parse_confirmation(answer: &str, default: bool) -> bool {
    let answer = answer.trim().to_lowercase();
    if answer.is_empty() {
        return default;
    }
    YES_ANSWERS.contains(&answer.as_str())
}

/// Source of user answers.
pub trait Prompter {
    /// Show `prompt` and read one line, without its trailing newline.
    ///
    /// End of input is reported as [`XcmError::Interrupted`].
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Ask a yes/no question.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "(Y/n)" } else { "(y/N)" };
        let answer = self.read_line(&format!("{question} {hint}: "))?;
        Ok(parse_confirmation(&answer, default))
    }

    /// Wait for the user to press Enter.
    fn pause(&mut self) -> Result<()> {
        self.read_line("Press Enter to continue...").map(|_| ())
    }
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        (**self).read_line(prompt)
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        (**self).confirm(question, default)
    }

    fn pause(&mut self) -> Result<()> {
        (**self).pause()
    }
}

/// Prompter reading lines from any reader and echoing prompts to a writer.
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl LinePrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.writer, "{}", style(prompt).bold())?;
        self.writer.flush()?;

        let mut line = String::new();
        let read = self.reader.read_line(&mut line)?;
        if read == 0 {
            // EOF: finish the prompt line before bailing out
            writeln!(self.writer)?;
            return Err(XcmError::Interrupted);
        }

        let answer = line.trim_end_matches(['\r', '\n']).to_string();
        trace!(prompt, answer = %answer, "Read answer");
        Ok(answer)
    }
}
