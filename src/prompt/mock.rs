//! Scripted prompter for deterministic tests.

use std::collections::VecDeque;

use tracing::trace;

use super::Prompter;
use crate::error::{Result, XcmError};

/// Prompter that replays a fixed list of answers and records every prompt.
///
/// Running out of answers behaves like end of input.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Every prompt shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        let answer = self.answers.pop_front().ok_or(XcmError::Interrupted)?;
        trace!(prompt, answer = %answer, "Scripted answer");
        Ok(answer)
    }
}
