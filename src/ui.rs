//! Terminal-facing collaborators: yes/no confirmation and progress reporting.

use std::cell::RefCell;
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::generate::GenerationState;

const SPINNER_MESSAGE_WIDTH: usize = 100;

/// Asks the operator a yes/no question.
pub trait Confirm {
    /// `Some(answer)`, or `None` when the question was cancelled.
    fn confirm(&self, prompt: &str) -> Option<bool>;
}

/// Receives progress from a running generation.
pub trait Reporter {
    fn state(&self, state: &GenerationState);
    fn progress(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Interactive yes/no prompt; Esc or `q` cancels.
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> Option<bool> {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact_opt()
            .unwrap_or_else(|e| {
                log::warn!("Could not read confirmation from terminal: {e}");
                None
            })
    }
}

/// Accepts every question, for `--yes`.
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    fn confirm(&self, prompt: &str) -> Option<bool> {
        log::info!("Auto-confirming: {prompt}");
        Some(true)
    }
}

/// Spinner while waiting on the model, colored lines for everything else.
pub struct TerminalReporter {
    spinner: RefCell<Option<ProgressBar>>,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self {
            spinner: RefCell::new(None),
        }
    }

    fn start_spinner(&self) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Waiting for response...".green().bold().to_string());
        spinner.enable_steady_tick(Duration::from_millis(120));
        self.stop_spinner();
        *self.spinner.borrow_mut() = Some(spinner);
    }

    fn stop_spinner(&self) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_and_clear();
        }
    }

    /// Warnings and errors end the waiting phase, so the spinner goes first.
    fn print_line(&self, line: String) {
        self.stop_spinner();
        eprintln!("{line}");
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalReporter {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}

impl Reporter for TerminalReporter {
    fn state(&self, state: &GenerationState) {
        match state {
            GenerationState::AwaitingResponse { .. } => self.start_spinner(),
            GenerationState::Extracting
            | GenerationState::Accepted
            | GenerationState::Aborted
            | GenerationState::Retrying { .. } => self.stop_spinner(),
            GenerationState::Building => {}
        }
    }

    fn progress(&self, message: &str) {
        let line = status_line(message);
        match self.spinner.borrow().as_ref() {
            Some(spinner) => spinner.set_message(line),
            None => eprintln!("{}", line.dimmed()),
        }
    }

    fn warn(&self, message: &str) {
        self.print_line(message.yellow().bold().to_string());
    }

    fn error(&self, message: &str) {
        self.print_line(message.red().bold().to_string());
    }
}

/// Last non-empty line of `text`, clipped to fit beside the spinner.
fn status_line(text: &str) -> String {
    let last = text
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("")
        .trim();

    if last.chars().count() <= SPINNER_MESSAGE_WIDTH {
        last.to_string()
    } else {
        let clipped: String = last.chars().take(SPINNER_MESSAGE_WIDTH).collect();
        format!("{clipped}…")
    }
}
