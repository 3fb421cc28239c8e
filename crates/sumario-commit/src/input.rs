// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Operator input
//!
//! Every place the program waits for the operator goes through
//! [`InputSource::prompt`], which either yields a line or reports that the
//! operator cancelled. Interrupts are only observed at these boundaries.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

/// Exit status used when the operator interrupts the session
pub const INTERRUPT_EXIT_CODE: u8 = 130;

/// Result of one prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A line of input, without its line terminator
    Line(String),
    /// The operator cancelled (Ctrl+C or end of input)
    Cancelled,
}

/// Source of operator input
pub trait InputSource {
    /// Show `label` and wait for one line
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the underlying stream fails.
    fn prompt(&mut self, label: &str) -> io::Result<Reply>;
}

/// Interactive input from stdin
#[derive(Debug, Clone)]
pub struct ConsoleInput {
    interrupted: Arc<AtomicBool>,
}

impl ConsoleInput {
    /// Console input observing an existing interrupt flag
    #[must_use]
    pub fn new(interrupted: Arc<AtomicBool>) -> Self {
        Self { interrupted }
    }

    /// Install a Ctrl+C handler and return console input bound to it
    ///
    /// The first Ctrl+C cancels the pending prompt once the current line is
    /// read. A second one before that exits immediately, so a stalled git or
    /// network call can still be abandoned.
    ///
    /// # Errors
    ///
    /// Fails if a handler is already installed for this process.
    pub fn with_interrupt_handler() -> Result<Self, ctrlc::Error> {
        let interrupted = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&interrupted);
        ctrlc::set_handler(move || {
            if flag.swap(true, Ordering::SeqCst) {
                eprintln!();
                std::process::exit(i32::from(INTERRUPT_EXIT_CODE));
            }
        })?;
        Ok(Self::new(interrupted))
    }

    /// Whether a Ctrl+C arrived that no prompt has consumed yet
    #[must_use]
    pub fn was_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    fn take_interrupt(&self) -> bool {
        self.interrupted.swap(false, Ordering::SeqCst)
    }
}

impl InputSource for ConsoleInput {
    fn prompt(&mut self, label: &str) -> io::Result<Reply> {
        if self.take_interrupt() {
            return Ok(Reply::Cancelled);
        }

        let mut stdout = io::stdout().lock();
        write!(stdout, "{label}")?;
        stdout.flush()?;
        drop(stdout);

        let mut line = String::new();
        let read = match io::stdin().lock().read_line(&mut line) {
            Ok(read) => read,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => 0,
            Err(err) => return Err(err),
        };

        if self.take_interrupt() || read == 0 {
            debug!("Prompt cancelled");
            println!();
            return Ok(Reply::Cancelled);
        }

        Ok(Reply::Line(
            line.trim_end_matches(['\r', '\n']).to_string(),
        ))
    }
}

/// Console input that installs its Ctrl+C handler on the first prompt
///
/// Scripted runs that never need to ask anything keep the default signal
/// behaviour, so an interrupt still terminates them.
#[derive(Debug, Default)]
pub struct OnDemandConsole {
    console: Option<ConsoleInput>,
}

impl OnDemandConsole {
    /// Whether a prompt has been shown and a Ctrl+C is still pending
    #[must_use]
    pub fn was_interrupted(&self) -> bool {
        self.console
            .as_ref()
            .is_some_and(ConsoleInput::was_interrupted)
    }
}

impl InputSource for OnDemandConsole {
    fn prompt(&mut self, label: &str) -> io::Result<Reply> {
        let console = match self.console.take() {
            Some(console) => console,
            None => ConsoleInput::with_interrupt_handler().map_err(io::Error::other)?,
        };
        self.console.insert(console).prompt(label)
    }
}

/// Pre-recorded input, mainly for tests
///
/// Once the script runs out every prompt is answered with
/// [`Reply::Cancelled`].
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    replies: VecDeque<Reply>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    /// Script answering each prompt with the next line
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: lines.into_iter().map(|l| Reply::Line(l.into())).collect(),
            prompts: Vec::new(),
        }
    }

    /// Append an explicit cancellation
    #[must_use]
    pub fn then_cancel(mut self) -> Self {
        self.replies.push_back(Reply::Cancelled);
        self
    }

    /// Append another line
    #[must_use]
    pub fn then_line(mut self, line: impl Into<String>) -> Self {
        self.replies.push_back(Reply::Line(line.into()));
        self
    }

    /// Labels shown so far, in order
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Replies not yet consumed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

impl InputSource for ScriptedInput {
    fn prompt(&mut self, label: &str) -> io::Result<Reply> {
        self.prompts.push(label.to_string());
        Ok(self.replies.pop_front().unwrap_or(Reply::Cancelled))
    }
}
