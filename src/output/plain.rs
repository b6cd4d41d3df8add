//! Unstyled output to any writer.
//!
//! A capture buffer for tests: `Session` tests render into it and assert
//! on the text.

use std::cell::RefCell;
use std::io::Write;

use tracing::warn;

use super::{Output, Tone};

/// Plain text output with bracketed markers instead of colors.
pub struct PlainOutput<W: Write> {
    writer: RefCell<W>,
}

impl<W: Write> PlainOutput<W> {
    pub const fn new(writer: W) -> Self {
        Self {
            writer: RefCell::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl PlainOutput<Vec<u8>> {
    /// Output capturing everything in memory.
    pub const fn buffer() -> Self {
        Self::new(Vec::new())
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.writer.borrow()).into_owned()
    }
}

impl<W: Write> Output for PlainOutput<W> {
    fn line(&self, tone: Tone, text: &str) {
        let marker = match tone {
            Tone::Success => "[OK] ",
            Tone::Error => "[ERR] ",
            Tone::Warning => "[WARN] ",
            Tone::Info | Tone::Muted | Tone::Heading | Tone::Plain => "",
        };
        if let Err(e) = writeln!(self.writer.borrow_mut(), "{marker}{text}") {
            warn!(error = %e, "Failed to write output");
        }
    }
}
