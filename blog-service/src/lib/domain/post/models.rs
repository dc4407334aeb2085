use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::post::errors::PostTitleError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Post entity, always loaded together with its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: PostTitle,
    pub body: String,
    pub author: User,
    pub created_at: DateTime<Utc>,
}

/// Post unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(pub Uuid);

impl PostId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Post title value type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    const MAX_LENGTH: usize = 200;

    pub fn new(title: String) -> Result<Self, PostTitleError> {
        if title.trim().is_empty() {
            return Err(PostTitleError::Blank);
        }

        let length = title.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(PostTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to publish a post on behalf of an existing user.
#[derive(Debug)]
pub struct CreatePostCommand {
    pub author_id: UserId,
    pub title: PostTitle,
    pub body: String,
}

impl CreatePostCommand {
    pub fn new(author_id: UserId, title: PostTitle, body: String) -> Self {
        Self {
            author_id,
            title,
            body,
        }
    }
}
