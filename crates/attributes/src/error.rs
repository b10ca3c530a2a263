use thiserror::Error;

/// Errors raised while building attribute values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AttributeError {
    #[error("confidence must be within [0, 1], got {0}")]
    InvalidConfidence(f64),
}
