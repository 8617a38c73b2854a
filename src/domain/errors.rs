//! Domain errors for the resonance engine.

use thiserror::Error;

/// Domain-level errors that can occur in the resonator system.
///
/// The core iteration pipeline is total over well-formed input; these
/// variants cover misuse of the run state machine and serialization at the
/// edges, not engine failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid state transition from {from} to {to}: {reason}")]
    InvalidStateTransition {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
