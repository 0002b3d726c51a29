//! Identity-provider capability consumed by the auth gate.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Identity attributes asserted by a validated access token.
///
/// Never empty: [`Claims::from_map`] refuses an empty mapping, so holding a
/// `Claims` value is the authentication signal on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn from_map(map: Map<String, Value>) -> Option<Self> {
        if map.is_empty() { None } else { Some(Self(map)) }
    }

    pub fn subject(&self) -> Option<&str> {
        self.0.get("sub").and_then(Value::as_str)
    }

    /// `roles` claim as a list of strings; anything else yields an empty list.
    pub fn roles(&self) -> Vec<&str> {
        self.0
            .get("roles")
            .and_then(Value::as_array)
            .map(|roles| roles.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// Credentials issued by a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    /// Present only when the provider rotated the refresh token.
    pub refresh_token: Option<String>,
}

/// Failures talking to the identity provider.
///
/// A rejected token is not an error (`Ok(None)`); these variants cover the
/// cases where no verdict could be obtained.
#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("identity provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("identity provider returned status {0}")]
    UpstreamStatus(u16),
    #[error("invalid identity provider response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// `Ok(Some(claims))` for a valid access token, `Ok(None)` otherwise.
    async fn validate(&self, access_token: &str) -> Result<Option<Claims>, ValidatorError>;

    /// Exchange a refresh token for new credentials; `Ok(None)` when refused.
    async fn refresh(&self, refresh_token: &str) -> Result<Option<TokenPair>, ValidatorError>;
}
