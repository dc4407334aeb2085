use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::AgeError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Carries the stored credential hash; outbound DTOs must never expose it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: Username,
    pub age: Age,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Compared byte for byte: "Jame" and "jame" are different users.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MAX_LENGTH: usize = 64;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `Blank` - Empty or whitespace only
    /// * `TooLong` - More than 64 characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        if username.trim().is_empty() {
            return Err(UsernameError::Blank);
        }

        let length = username.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Age in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age(i32);

impl Age {
    const MIN: i32 = 0;
    const MAX: i32 = 150;

    pub fn new(age: i32) -> Result<Self, AgeError> {
        if (Self::MIN..=Self::MAX).contains(&age) {
            Ok(Self(age))
        } else {
            Err(AgeError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: age,
            })
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// Command to register a new user.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub name: Username,
    pub age: Age,
    /// Plain text password, hashed by the service before storage
    pub password: String,
}

impl RegisterUserCommand {
    pub fn new(name: Username, age: Age, password: String) -> Self {
        Self {
            name,
            age,
            password,
        }
    }
}

/// Command to exchange a username and password for an access token.
#[derive(Debug)]
pub struct LoginCommand {
    pub name: Username,
    pub password: String,
}

impl LoginCommand {
    pub fn new(name: Username, password: String) -> Self {
        Self { name, password }
    }
}
