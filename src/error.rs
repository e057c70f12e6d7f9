//! Error types for the orbital cloud core

/// Errors raised by the sample field generator and the evolution engine.
///
/// Both kinds are programmer errors: they are surfaced immediately and never retried.
#[derive(Debug, thiserror::Error)]
pub enum CloudError {
    /// Generator arguments out of range
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Engine used before binding, or against a population of the wrong size
    #[error("invalid state: {0}")]
    InvalidState(String),
}

/// Result type for orbital cloud operations
pub type Result<T> = std::result::Result<T, CloudError>;
