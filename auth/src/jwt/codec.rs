use std::str::FromStr;

use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Token lifetime used when no other value is configured.
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 30;

/// Signs and verifies compact JWS access tokens.
///
/// Holds the shared secret and the single accepted algorithm. The codec is
/// immutable once built and is shared across request tasks behind an `Arc`.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl TokenCodec {
    /// Create a codec for an HMAC algorithm.
    ///
    /// # Arguments
    /// * `secret` - Shared signing secret
    /// * `algorithm` - One of HS256, HS384, HS512
    /// * `default_ttl` - Lifetime applied by [`TokenCodec::encode`] when none is given
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Algorithm is not a symmetric HMAC algorithm
    pub fn new(
        secret: &[u8],
        algorithm: Algorithm,
        default_ttl: Duration,
    ) -> Result<Self, TokenError> {
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(TokenError::UnsupportedAlgorithm(format!("{:?}", algorithm)));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            default_ttl,
        })
    }

    /// Create a codec from the algorithm name found in configuration (e.g. "HS256").
    pub fn from_algorithm_name(
        secret: &[u8],
        algorithm: &str,
        default_ttl: Duration,
    ) -> Result<Self, TokenError> {
        let algorithm = Algorithm::from_str(algorithm)
            .map_err(|_| TokenError::UnsupportedAlgorithm(algorithm.to_string()))?;

        Self::new(secret, algorithm, default_ttl)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Sign a copy of `claims` with `exp` set to now + `expires_in`.
    ///
    /// An `exp` already present on `claims` is overwritten in the copy; the
    /// caller's value is left untouched.
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiry out of range, serialization or signing failed
    pub fn encode(&self, claims: &Claims, expires_in: Option<Duration>) -> Result<String, TokenError> {
        let ttl = expires_in.unwrap_or(self.default_ttl);
        let expiration = Utc::now().checked_add_signed(ttl).ok_or_else(|| {
            TokenError::EncodingFailed(format!("expiry out of range: {}", ttl))
        })?;
        let claims = claims
            .clone()
            .into_registered()
            .with_expiration(expiration.timestamp());

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token against the current UTC time.
    ///
    /// # Errors
    /// * `Invalid` - Malformed token, bad signature, algorithm mismatch or missing `exp`
    /// * `Expired` - Current time is at or past `exp`
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode_at(token, Utc::now().timestamp())
    }

    /// Verify a token against an explicit Unix timestamp.
    pub fn decode_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below with a strict, zero-leeway comparison.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?
            .claims;

        if claims.exp.is_none() {
            return Err(TokenError::Invalid("missing exp claim".to_string()));
        }
        if claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
