//! Confirmation gate guarding recursive directory removal.
//!
//! Each expired directory starts in [`GateState::Prompting`] and only leaves
//! it for [`GateState::Confirmed`] or [`GateState::Declined`]. Unrecognized
//! answers re-prompt; there is no retry limit, so a [`Responder`] that never
//! produces a yes or no keeps the pass waiting forever. Non-interactive callers
//! should use `force`, which confirms without asking.

use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::trace;

/// Where a directory sits in the confirmation process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Waiting for a clear yes or no
    Prompting,
    /// Recursive removal approved
    Confirmed,
    /// Removal refused; the directory is left alone
    Declined,
}

impl GateState {
    /// Applies one parsed answer. Only `Prompting` moves; terminal states stay put.
    #[must_use]
    pub const fn next(self, answer: Option<bool>) -> Self {
        match (self, answer) {
            (Self::Prompting, Some(true)) => Self::Confirmed,
            (Self::Prompting, Some(false)) => Self::Declined,
            (state, _) => state,
        }
    }

    /// Whether a decision has been reached.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Prompting)
    }
}

/// Source of answers to confirmation prompts.
pub trait Responder {
    /// Shows `prompt` and returns the raw answer.
    ///
    /// # Errors
    ///
    /// Returns an error when no answer can be obtained, e.g. end of input.
    fn respond(&mut self, prompt: &str) -> io::Result<String>;
}

impl<F> Responder for F
where
    F: FnMut(&str) -> io::Result<String>,
{
    fn respond(&mut self, prompt: &str) -> io::Result<String> {
        self(prompt)
    }
}

/// Line-oriented responder over a reader/writer pair, normally stdin/stdout.
pub struct StdinResponder<R, W> {
    /// Where answers are read from
    input: R,
    /// Where prompts are written
    output: W,
}

impl<R: BufRead, W: Write> StdinResponder<R, W> {
    /// Responder reading answers from `input` and writing prompts to `output`.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl StdinResponder<io::StdinLock<'static>, io::Stdout> {
    /// Responder bound to the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Responder for StdinResponder<R, W> {
    fn respond(&mut self, prompt: &str) -> io::Result<String> {
        writeln!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before a yes/no answer was given",
            ));
        }
        Ok(line)
    }
}

/// Parses a yes/no answer. Anything else is `None`.
#[must_use]
pub fn parse_answer(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Prompt shown for an expired directory.
#[must_use]
pub fn prompt_for(path: &Path, entries: usize) -> String {
    format!(
        "remove directory recursively [y/n]: {} ({entries} entries)",
        path.display()
    )
}

/// Runs the gate for one directory until it reaches a terminal state.
///
/// # Errors
///
/// Propagates responder failures; the directory must then be left untouched.
pub fn decide(
    force: bool,
    prompt: &str,
    responder: &mut dyn Responder,
) -> io::Result<GateState> {
    if force {
        return Ok(GateState::Confirmed);
    }

    let mut state = GateState::Prompting;
    while !state.is_terminal() {
        let answer = responder.respond(prompt)?;
        trace!(answer = answer.trim(), "confirmation answer");
        state = state.next(parse_answer(&answer));
    }
    Ok(state)
}
