use std::env;

use auth::TokenCodec;
use auth::TokenError;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use config::Map;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: i64,
}

// Keeps the signing secret out of logs.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_expiration_minutes() -> i64 {
    auth::DEFAULT_EXPIRATION_MINUTES
}

/// Errors turning the `[jwt]` section into a token codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtConfigError {
    #[error("jwt.expiration_minutes must be positive, got {0}")]
    NonPositiveExpiration(i64),

    #[error("jwt.expiration_minutes out of range: {0}")]
    ExpirationOutOfRange(i64),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl JwtConfig {
    /// Build the token codec described by this section.
    ///
    /// # Errors
    /// * `NonPositiveExpiration` - `expiration_minutes` is zero or negative
    /// * `ExpirationOutOfRange` - `expiration_minutes` cannot be added to the current time
    /// * `Token(UnsupportedAlgorithm)` - `algorithm` is not HS256, HS384 or HS512
    pub fn token_codec(&self) -> Result<TokenCodec, JwtConfigError> {
        if self.expiration_minutes <= 0 {
            return Err(JwtConfigError::NonPositiveExpiration(
                self.expiration_minutes,
            ));
        }

        let ttl = chrono::Duration::try_minutes(self.expiration_minutes)
            .filter(|ttl| chrono::Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or(JwtConfigError::ExpirationOutOfRange(self.expiration_minutes))?;

        Ok(TokenCodec::from_algorithm_name(
            self.secret.as_bytes(),
            &self.algorithm,
            ttl,
        )?)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (BLOG_JWT__SECRET, BLOG_SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        Self::load_from(&run_mode, None)
    }

    /// Load the `run_mode` profile. When `environment` is given it stands in
    /// for the process environment.
    pub fn load_from(
        run_mode: &str,
        environment: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: BLOG_DATABASE__URL=sqlite://blog.db overrides database.url
            .add_source(
                Environment::with_prefix("BLOG")
                    .prefix_separator("_")
                    .separator("__")
                    .source(environment),
            )
            .build()?;

        configuration.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_config(algorithm: &str) -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-for-jwt-signing-at-least-32-bytes".to_string(),
            algorithm: algorithm.to_string(),
            expiration_minutes: 30,
        }
    }

    #[test]
    fn test_token_codec_from_config() {
        let codec = jwt_config("HS256").token_codec().unwrap();
        assert_eq!(codec.default_ttl(), chrono::Duration::minutes(30));
    }

    #[test]
    fn test_token_codec_rejects_asymmetric_algorithm() {
        assert!(matches!(
            jwt_config("RS256").token_codec(),
            Err(JwtConfigError::Token(TokenError::UnsupportedAlgorithm(_)))
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", jwt_config("HS256"));
        assert!(!rendered.contains("test-secret-key"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_defaults_from_source() {
        let config: Config = ConfigBuilder::builder()
            .set_override("database.url", "sqlite::memory:")
            .unwrap()
            .set_override("server.http_port", 8000)
            .unwrap()
            .set_override("jwt.secret", "s3cret")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.jwt.algorithm, "HS256");
        assert_eq!(config.jwt.expiration_minutes, 30);
    }

    #[test]
    fn test_token_codec_rejects_non_positive_expiration() {
        for minutes in [0, -5] {
            let jwt = JwtConfig {
                expiration_minutes: minutes,
                ..jwt_config("HS256")
            };
            assert_eq!(
                jwt.token_codec().err(),
                Some(JwtConfigError::NonPositiveExpiration(minutes))
            );
        }
    }

    #[test]
    fn test_token_codec_rejects_out_of_range_expiration() {
        for minutes in [i64::MAX, 60 * 24 * 365 * 300_000] {
            let jwt = JwtConfig {
                expiration_minutes: minutes,
                ..jwt_config("HS256")
            };
            assert_eq!(
                jwt.token_codec().err(),
                Some(JwtConfigError::ExpirationOutOfRange(minutes))
            );
        }
    }

    #[test]
    fn test_load_test_profile_with_environment_override() {
        let environment: Map<String, String> = [
            ("BLOG_JWT__SECRET", "override-secret-key-at-least-32-bytes!"),
            ("BLOG_SERVER__HTTP_PORT", "9100"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

        let config = Config::load_from("test", Some(environment)).unwrap();

        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 1);
        assert_eq!(config.server.http_port, 9100);
        assert_eq!(config.jwt.secret, "override-secret-key-at-least-32-bytes!");
        assert_eq!(config.jwt.algorithm, "HS256");
        assert_eq!(config.jwt.expiration_minutes, 30);
    }

    #[test]
    fn test_load_default_profile_without_environment() {
        let config = Config::load_from("development", Some(Map::new())).unwrap();

        assert_eq!(config.database.url, "sqlite://blog.db");
        assert_eq!(config.server.http_port, 8000);
        assert!(config.jwt.token_codec().is_ok());
    }
}
