//! `TerminalReporter`: Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::ProgressReporter`
//! trait so application services can emit progress events without depending on
//! any presentation type directly.

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::{OutputContext, progress};

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// With a spinner, `step()` only updates the spinner message and
/// `success()`/`warn()` print above it. Without one, every event is a line:
///
/// - `step()` prints `"  → {message}"`
/// - `success()` prints `"  ✓ {message}"`
/// - `warn()` prints `"  ! {message}"`
///
/// Nothing is printed when `silent` (quiet or JSON mode).
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    silent: bool,
    spinner: Option<ProgressBar>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext, silent: bool) -> Self {
        Self {
            ctx,
            silent: silent || ctx.quiet,
            spinner: None,
        }
    }

    /// Same as [`new`](Self::new), plus a spinner when the terminal supports it.
    #[must_use]
    pub fn with_spinner(ctx: &'a OutputContext, silent: bool, message: &str) -> Self {
        let mut reporter = Self::new(ctx, silent);
        if !reporter.silent && ctx.show_progress() {
            reporter.spinner = Some(progress::spinner(message));
        }
        reporter
    }

    /// Remove the spinner, if any.
    pub fn finish(&self) {
        if let Some(pb) = &self.spinner {
            progress::finish_clear(pb);
        }
    }

    fn line(&self, text: &str) {
        match &self.spinner {
            Some(pb) => pb.suspend(|| println!("{text}")),
            None => println!("{text}"),
        }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if self.silent {
            return;
        }
        match &self.spinner {
            Some(pb) => pb.set_message(message.to_string()),
            None => println!("  {} {message}", "→".style(self.ctx.styles.info)),
        }
    }

    fn success(&self, message: &str) {
        if !self.silent {
            self.line(&format!("  {} {message}", "✓".style(self.ctx.styles.success)));
        }
    }

    fn warn(&self, message: &str) {
        if !self.silent {
            self.line(&format!("  {} {message}", "!".style(self.ctx.styles.warning)));
        }
    }
}

impl Drop for TerminalReporter<'_> {
    fn drop(&mut self) {
        self.finish();
    }
}
