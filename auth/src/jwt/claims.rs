use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

const SUBJECT: &str = "sub";
const EXPIRATION: &str = "exp";

/// Token payload.
///
/// `sub` and `exp` are the two claims the service relies on; anything else a
/// caller wants to carry goes into `extra` and is flattened into the token.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (the username the token was issued to)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp, UTC seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims for a freshly authenticated user. Expiry is added at encode time.
    pub fn for_subject(subject: impl ToString) -> Self {
        Self::new().with_subject(subject)
    }

    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Add a custom claim. Values that fail to serialize are skipped.
    ///
    /// `sub` and `exp` set the typed fields instead; a value of the wrong
    /// JSON type for either is skipped.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        let key = key.to_string();
        let Ok(json_value) = serde_json::to_value(value) else {
            return self;
        };

        match key.as_str() {
            SUBJECT => {
                if let Some(sub) = json_value.as_str() {
                    self.sub = Some(sub.to_string());
                }
            }
            EXPIRATION => {
                if let Some(exp) = json_value.as_i64() {
                    self.exp = Some(exp);
                }
            }
            _ => {
                self.extra.insert(key, json_value);
            }
        }
        self
    }

    /// Move `sub`/`exp` written straight into `extra` onto the typed fields
    /// so the serialized payload never carries a key twice.
    ///
    /// A typed field that is already set wins over the `extra` entry.
    pub(crate) fn into_registered(mut self) -> Self {
        if let Some(value) = self.extra.remove(SUBJECT) {
            if self.sub.is_none() {
                self.sub = value.as_str().map(str::to_string);
            }
        }
        if let Some(value) = self.extra.remove(EXPIRATION) {
            if self.exp.is_none() {
                self.exp = value.as_i64();
            }
        }
        self
    }

    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    /// A token is live only while `now` is strictly before `exp`.
    ///
    /// Claims without `exp` are treated as expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(true, |exp| current_timestamp >= exp)
    }
}
