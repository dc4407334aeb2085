use thiserror::Error;

/// Error type for credential hashing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored hash could not be parsed. Callers treat this as a mismatch.
    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
