//! Operator-facing messages.
//!
//! Warnings and informational notices go to stdout: none of them are errors.
//! Per-path confirmations only appear when verbose output was requested.

use colored::Colorize;

use crate::config::Verbosity;

/// Message sink carrying the invocation's verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Output {
    verbosity: Verbosity,
}

impl Output {
    /// Creates a printer for the given verbosity.
    #[must_use]
    pub const fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Whether verbose-only lines are printed.
    #[must_use]
    pub const fn is_verbose(&self) -> bool {
        self.verbosity.is_verbose()
    }

    /// Prints a success message in green.
    pub fn success(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message);
    }

    /// Prints a warning in bold yellow (always shown).
    pub fn warning(&self, message: &str) {
        println!("{} {}", "⚠".yellow().bold(), message);
    }

    /// Prints an informational notice (always shown).
    pub fn info(&self, message: &str) {
        println!("{} {}", "ℹ".blue().bold(), message);
    }

    /// Prints a git-style action line, only in verbose mode.
    pub fn action(&self, verb: &str, message: &str) {
        if !self.verbosity.is_verbose() {
            return;
        }
        println!("{} {}", verb.dimmed().bold(), message);
    }

    /// Prints an unstyled line, e.g. a listing row.
    pub fn line(&self, message: &str) {
        println!("{message}");
    }
}
