use std::fmt;

use serde::Serialize;

use crate::jwt::Claims;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining credential hashing and token handling.
///
/// Holds no per-request state. One instance is built at startup and shared.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

/// Bearer token handed back on successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Username asserted by a verified token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubjectIdentity(String);

impl SubjectIdentity {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SubjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    pub fn new(token_codec: TokenCodec) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash.
    ///
    /// A corrupted stored hash counts as a mismatch.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        match self.password_hasher.verify(password, stored_hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash could not be parsed");
                false
            }
        }
    }

    /// Verify credentials and issue a bearer token for `claims`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match or the stored hash is corrupted
    /// * `Token` - Token signing failed
    pub fn issue_token(
        &self,
        password: &str,
        stored_hash: &str,
        claims: &Claims,
    ) -> Result<AccessToken, AuthenticationError> {
        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        self.generate_token(claims)
    }

    /// Sign `claims` with the default expiry, skipping password checks.
    pub fn generate_token(&self, claims: &Claims) -> Result<AccessToken, AuthenticationError> {
        let access_token = self.token_codec.encode(claims, None)?;
        Ok(AccessToken::bearer(access_token))
    }

    /// Verify a token and return its claims, keeping the invalid/expired distinction.
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_codec.decode(token)
    }

    /// Verify a token and extract the subject it was issued to.
    ///
    /// Every failure collapses into `Unauthorized`; the reason is only logged.
    pub fn authenticate(&self, token: &str) -> Result<SubjectIdentity, AuthenticationError> {
        let claims = self.validate_token(token).map_err(|e| {
            match &e {
                TokenError::Expired => tracing::debug!("Rejected expired token"),
                _ => tracing::warn!(error = %e, "Rejected invalid token"),
            }
            AuthenticationError::Unauthorized(e.to_string())
        })?;

        match claims.sub {
            Some(subject) if !subject.is_empty() => Ok(SubjectIdentity(subject)),
            _ => {
                tracing::warn!("Token verified but carries no subject");
                Err(AuthenticationError::Unauthorized(
                    "missing sub claim".to_string(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use jsonwebtoken::Algorithm;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Authenticator {
        let codec = TokenCodec::new(SECRET, Algorithm::HS256, Duration::minutes(30))
            .expect("Failed to build codec");
        Authenticator::new(codec)
    }

    #[test]
    fn test_issue_token_success() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("qwerty").unwrap();

        let token = authenticator
            .issue_token("qwerty", &hash, &Claims::for_subject("Jame"))
            .expect("Authentication failed");

        assert_eq!(token.token_type, "bearer");
        assert!(!token.access_token.is_empty());

        let subject = authenticator.authenticate(&token.access_token).unwrap();
        assert_eq!(subject.as_str(), "Jame");
    }

    #[test]
    fn test_issue_token_invalid_password() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("qwerty").unwrap();

        let result = authenticator.issue_token("wrong", &hash, &Claims::for_subject("Jame"));
        assert_eq!(result, Err(AuthenticationError::InvalidCredentials));
    }

    #[test]
    fn test_issue_token_corrupted_hash() {
        let authenticator = authenticator();

        let result =
            authenticator.issue_token("qwerty", "$argon2id$broken", &Claims::for_subject("Jame"));
        assert_eq!(result, Err(AuthenticationError::InvalidCredentials));
    }

    #[test]
    fn test_authenticate_garbage_token() {
        let result = authenticator().authenticate("garbage-token");
        assert!(matches!(result, Err(AuthenticationError::Unauthorized(_))));
    }

    #[test]
    fn test_authenticate_expired_token() {
        let codec = TokenCodec::new(SECRET, Algorithm::HS256, Duration::seconds(-1)).unwrap();
        let authenticator = Authenticator::new(codec);
        let token = authenticator
            .generate_token(&Claims::for_subject("Jame"))
            .unwrap();

        assert_eq!(
            authenticator.validate_token(&token.access_token),
            Err(TokenError::Expired)
        );
        assert!(matches!(
            authenticator.authenticate(&token.access_token),
            Err(AuthenticationError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_authenticate_missing_subject() {
        let authenticator = authenticator();
        let token = authenticator
            .generate_token(&Claims::new().with_extra("scope", "posts"))
            .unwrap();

        let result = authenticator.authenticate(&token.access_token);
        assert_eq!(
            result,
            Err(AuthenticationError::Unauthorized(
                "missing sub claim".to_string()
            ))
        );
    }

    #[test]
    fn test_access_token_serializes_bearer_type() {
        let json = serde_json::to_value(AccessToken::bearer("abc".to_string())).unwrap();
        assert_eq!(json["access_token"], "abc");
        assert_eq!(json["token_type"], "bearer");
    }

    #[test]
    fn test_authentication_error_messages() {
        let cases = [
            AuthenticationError::InvalidCredentials,
            AuthenticationError::Unauthorized("missing sub claim".to_string()),
            AuthenticationError::Token(TokenError::Expired),
        ];

        for error in cases {
            let message = match &error {
                AuthenticationError::InvalidCredentials => "Invalid credentials".to_string(),
                AuthenticationError::Unauthorized(reason) => format!("Unauthorized: {}", reason),
                AuthenticationError::Token(e) => format!("Token error: {}", e),
            };
            assert_eq!(error.to_string(), message);
        }
    }
}
