use thiserror::Error;

use crate::user::errors::UserError;

/// Error for PostTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostTitleError {
    #[error("Post title must not be blank")]
    Blank,

    #[error("Post title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all post-related operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostError {
    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] PostTitleError),

    #[error("User not found: {0}")]
    AuthorNotFound(String),

    #[error("Post not found")]
    NotFound,

    #[error(transparent)]
    User(#[from] UserError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
