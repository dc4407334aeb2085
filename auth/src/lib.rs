//! Authentication core for the blog service.
//!
//! - Credential hashing (Argon2id)
//! - Signed, time-limited access tokens (HMAC JWT)
//! - An `Authenticator` tying both together for login and request authentication
//!
//! Nothing in this crate performs I/O; user lookup and storage belong to the caller.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("qwerty").unwrap();
//! assert!(hasher.verify("qwerty", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Claims, TokenCodec};
//! use chrono::Duration;
//!
//! let codec = TokenCodec::from_algorithm_name(
//!     b"secret_key_at_least_32_bytes_long!",
//!     "HS256",
//!     Duration::minutes(30),
//! )
//! .unwrap();
//! let token = codec.encode(&Claims::for_subject("Jame"), None).unwrap();
//! let decoded = codec.decode(&token).unwrap();
//! assert_eq!(decoded.subject(), Some("Jame"));
//! ```
//!
//! ## Login and request authentication
//! ```
//! use auth::{Authenticator, Claims, TokenCodec};
//! use chrono::Duration;
//!
//! let codec = TokenCodec::from_algorithm_name(
//!     b"secret_key_at_least_32_bytes_long!",
//!     "HS256",
//!     Duration::minutes(30),
//! )
//! .unwrap();
//! let auth = Authenticator::new(codec);
//!
//! let hash = auth.hash_password("qwerty").unwrap();
//! let token = auth
//!     .issue_token("qwerty", &hash, &Claims::for_subject("Jame"))
//!     .unwrap();
//! assert_eq!(token.token_type, "bearer");
//!
//! let subject = auth.authenticate(&token.access_token).unwrap();
//! assert_eq!(subject.as_str(), "Jame");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AccessToken;
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::SubjectIdentity;
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use jwt::DEFAULT_EXPIRATION_MINUTES;
pub use password::PasswordError;
pub use password::PasswordHasher;
