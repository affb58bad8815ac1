use thiserror::Error;

/// Errors raised by the simulation core.
///
/// Episode endings (collisions, timeouts, a full board) are reported through
/// [`crate::episode::Status`], never through this type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("decision index {0} is not one of 0 (left), 1 (straight), 2 (right)")]
    InvalidDecision(usize),
}

pub type Result<T> = std::result::Result<T, SimError>;
