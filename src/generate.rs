//! Request/response/retry cycle that turns a staged diff into a commit message.
//!
//! One run moves through `Building → AwaitingResponse → Extracting` and ends in
//! `Accepted` or `Aborted`, looping through `Retrying` while attempts remain.
//! Every transition is logged and handed to the [`Reporter`].

use std::thread;
use std::time::Duration;

use log::{debug, trace};

use crate::config::GenerationSettings;
use crate::diff::format::format_diff;
use crate::diff::stats::{parse_diff, totals};
use crate::diff::truncate::fit_diff;
use crate::error::GenerationError;
use crate::extract::extract;
use crate::llm::prompt_builder::{commit_message_prompt, summary_prompt, PromptPair, PromptStyle};
use crate::llm::{ChatClient, ChatMessage, CompletionRequest};
use crate::tokens;
use crate::ui::{Confirm, Reporter};

pub const MAX_ATTEMPTS: usize = 5;
pub const RETRY_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationState {
    Building,
    AwaitingResponse { attempt: usize },
    Extracting,
    Accepted,
    Retrying { attempt: usize },
    Aborted,
}

/// Size of a request against the ceiling it must fit under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBudget {
    pub request_tokens: usize,
    pub ceiling: usize,
}

impl TokenBudget {
    fn measure(prompt: &PromptPair, ceiling: usize) -> Self {
        Self {
            request_tokens: tokens::estimate(&prompt.combined()),
            ceiling,
        }
    }

    pub fn check(&self) -> Result<(), GenerationError> {
        if self.request_tokens > self.ceiling {
            Err(GenerationError::BudgetExceeded {
                tokens: self.request_tokens,
                ceiling: self.ceiling,
            })
        } else {
            Ok(())
        }
    }
}

/// Ceiling that grows with the request, capped at `max_tokens`.
pub fn dynamic_ceiling(
    request_tokens: usize,
    increment: usize,
    max_tokens: usize,
) -> Result<usize, GenerationError> {
    if max_tokens == 0 {
        return Err(GenerationError::InvalidInput(
            "max tokens must be greater than zero".to_string(),
        ));
    }
    Ok(request_tokens.saturating_add(increment).min(max_tokens))
}

/// Strip local-provider markers from a model name for display.
pub fn clean_model_name(model: &str) -> String {
    model
        .replace("local|", "")
        .replace("|{IP}|o", "")
        .replace("local", "")
}

/// Confirmation text when the change looks like an accidental mass deletion.
fn deletion_warning(additions: usize, deletions: usize) -> Option<String> {
    if additions > 0 {
        (deletions > 2 * additions).then(|| {
            format!(
                "The change has a high number of deletions ({deletions}) relative to additions ({additions}). Do you want to proceed?"
            )
        })
    } else if deletions > 0 {
        Some(format!(
            "The change has {deletions} deletions with no additions. Do you want to proceed?"
        ))
    } else {
        None
    }
}

/// A fully built commit-message request, reused across attempts.
struct CommitRequest {
    messages: [ChatMessage; 2],
    budget: TokenBudget,
    additions: usize,
    deletions: usize,
}

pub struct Generator<'a> {
    settings: GenerationSettings,
    client: &'a dyn ChatClient,
    confirm: &'a dyn Confirm,
    reporter: &'a dyn Reporter,
    retry_delay: Duration,
}

impl<'a> Generator<'a> {
    pub fn new(
        settings: GenerationSettings,
        client: &'a dyn ChatClient,
        confirm: &'a dyn Confirm,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            settings,
            client,
            confirm,
            reporter,
            retry_delay: RETRY_DELAY,
        }
    }

    #[cfg(test)]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Generate a commit message for `diff`.
    ///
    /// Returns an empty string when the run is aborted or every attempt fails;
    /// only [`GenerationError::InvalidInput`] is returned as an error.
    pub fn generate_commit_message(
        &self,
        diff: &str,
        notes: Option<&str>,
    ) -> Result<String, GenerationError> {
        self.transition(GenerationState::Building);
        let request = self.build_commit_request(diff, notes)?;

        for attempt in 1..=MAX_ATTEMPTS {
            debug!("Commit message attempt {attempt}/{MAX_ATTEMPTS}");
            if attempt > 1 {
                self.transition(GenerationState::Building);
            }

            let failure = match self.attempt(attempt, &request) {
                Ok(message) => {
                    self.transition(GenerationState::Accepted);
                    return Ok(message);
                }
                Err(e) => e,
            };

            match failure {
                GenerationError::ExtractionFailure { raw } => {
                    self.reporter.warn(&format!(
                        "Commit message format incorrect.\n\n```\n{raw}\n```\n"
                    ));
                    if attempt < MAX_ATTEMPTS {
                        self.reporter.warn("Retrying...");
                        self.transition(GenerationState::Retrying { attempt });
                        thread::sleep(self.retry_delay);
                    }
                }
                GenerationError::TransportFailure(e) => {
                    self.reporter
                        .error(&format!("Failed to generate commit message: {e:#}"));
                    if attempt < MAX_ATTEMPTS {
                        let retry =
                            self.ask("Failed to generate commit message. Would you like to retry?");
                        if !retry {
                            return Ok(self.abort());
                        }
                        self.transition(GenerationState::Retrying { attempt });
                    }
                }
                GenerationError::UserAborted | GenerationError::BudgetExceeded { .. } => {
                    return Ok(self.abort());
                }
                e @ GenerationError::InvalidInput(_) => {
                    self.transition(GenerationState::Aborted);
                    return Err(e);
                }
            }
        }

        self.reporter.error(
            "Failed to generate a properly formatted commit message after multiple attempts.",
        );
        self.transition(GenerationState::Aborted);
        Ok(String::new())
    }

    /// One-shot release-notes summary of `text`. No budgeting and no retries.
    pub fn generate_summary(&self, text: &str) -> Option<String> {
        self.transition(GenerationState::Building);
        let prompt = summary_prompt(text);
        let messages = prompt.messages();

        self.transition(GenerationState::AwaitingResponse { attempt: 1 });
        self.reporter.progress(&format!(
            "Sending {} tokens to {} ({})",
            tokens::estimate(text),
            clean_model_name(&self.settings.model),
            self.settings.temperature
        ));

        let result = self.complete(&messages, self.settings.max_tokens);
        match result {
            Ok(summary) if !summary.trim().is_empty() => {
                debug!("Summary generated successfully");
                self.transition(GenerationState::Accepted);
                Some(summary)
            }
            Ok(_) => {
                self.reporter.error("Summary format incorrect.");
                self.transition(GenerationState::Aborted);
                None
            }
            Err(e) => {
                self.reporter.error(&format!("Failed to generate summary: {e:#}"));
                self.transition(GenerationState::Aborted);
                None
            }
        }
    }

    fn build_commit_request(
        &self,
        diff: &str,
        notes: Option<&str>,
    ) -> Result<CommitRequest, GenerationError> {
        let style = PromptStyle::from_emoji_flag(self.settings.emoji);

        let mut prompt = commit_message_prompt(&format_diff(diff), notes, style);
        let request_tokens = tokens::estimate(&prompt.combined());
        let ceiling = dynamic_ceiling(
            request_tokens,
            self.settings.token_increment,
            self.settings.max_tokens,
        )?;
        let mut budget = TokenBudget {
            request_tokens,
            ceiling,
        };
        debug!("Request tokens {request_tokens}, ceiling {ceiling}");

        if budget.check().is_err() {
            self.reporter.warn(&format!(
                "Request exceeds max tokens ({request_tokens}/{ceiling}). Truncating..."
            ));
            let truncated = fit_diff(diff, style.system(), style.appendix(), ceiling);
            prompt = commit_message_prompt(&format_diff(&truncated), notes, style);
            budget = TokenBudget::measure(&prompt, ceiling);
            debug!(
                "After truncation, request tokens are {}/{}",
                budget.request_tokens, budget.ceiling
            );
        }
        trace!("Commit prompt:\n{}", prompt.user);

        let stats = parse_diff(diff);
        for file in &stats {
            trace!("{}: +{} -{}", file.path, file.additions, file.deletions);
        }
        let (additions, deletions) = totals(&stats);
        debug!("additions: {additions}, deletions: {deletions}");

        Ok(CommitRequest {
            messages: prompt.messages(),
            budget,
            additions,
            deletions,
        })
    }

    fn attempt(&self, attempt: usize, request: &CommitRequest) -> Result<String, GenerationError> {
        if let Err(over) = request.budget.check() {
            if !self.ask(&format!("{over}. Do you want to proceed?")) {
                return Err(GenerationError::UserAborted);
            }
        }

        if let Some(warning) = deletion_warning(request.additions, request.deletions) {
            if !self.ask(&warning) {
                return Err(GenerationError::UserAborted);
            }
        }

        self.transition(GenerationState::AwaitingResponse { attempt });
        self.reporter.progress(&format!(
            "> Analyzing changes to staged files with {} ({} tokens)",
            clean_model_name(&self.settings.model),
            request.budget.request_tokens
        ));

        let output = self
            .complete(&request.messages, request.budget.ceiling)
            .map_err(GenerationError::TransportFailure)?;
        trace!("Raw model output:\n{output}");

        self.transition(GenerationState::Extracting);
        extract(&output).ok_or(GenerationError::ExtractionFailure { raw: output })
    }

    fn complete(&self, messages: &[ChatMessage], max_tokens: usize) -> anyhow::Result<String> {
        let request = CompletionRequest {
            model: &self.settings.model,
            messages,
            max_tokens,
            temperature: self.settings.temperature,
            stream: self.settings.stream,
            timeout: self.settings.timeout,
        };
        self.client
            .complete(&request, &mut |partial| self.reporter.progress(partial))
    }

    fn ask(&self, prompt: &str) -> bool {
        self.confirm.confirm(prompt).unwrap_or(false)
    }

    fn abort(&self) -> String {
        self.reporter.error("Commit generation aborted by user.");
        self.transition(GenerationState::Aborted);
        String::new()
    }

    fn transition(&self, state: GenerationState) {
        debug!("Generation state: {state:?}");
        self.reporter.state(&state);
    }
}
