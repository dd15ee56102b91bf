use thiserror::Error;

/// Ways a commit-message generation attempt can fail.
///
/// Only [`GenerationError::InvalidInput`] escapes the generator; the rest are
/// recovered locally or end the run with an empty message.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Request exceeds the token budget ({tokens}/{ceiling})")]
    BudgetExceeded { tokens: usize, ceiling: usize },

    #[error("Model output did not contain a commit message")]
    ExtractionFailure { raw: String },

    #[error("Completion request failed: {0:#}")]
    TransportFailure(anyhow::Error),

    #[error("Generation aborted by user")]
    UserAborted,
}
