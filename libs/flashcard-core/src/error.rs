//! Error types for flashcard-core.

use thiserror::Error;

/// Result type alias using SchedulerError.
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Errors raised while rescheduling a card.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulerError {
    /// Judgment outside of again/hard/medium/easy.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The card handed in breaks a scheduling invariant.
    #[error("invalid card state: {0}")]
    InvalidState(String),

    #[error("interval of {interval} days is out of the representable range")]
    IntervalOverflow { interval: i64 },
}
