use thiserror::Error;

/// Error type for token encoding and verification.
///
/// `Invalid` and `Expired` are kept apart so callers can log them differently
/// even though both end up as an unauthorized response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid: {0}")]
    Invalid(String),

    #[error("Token is expired")]
    Expired,

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
}
