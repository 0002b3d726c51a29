use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::{TokenPair, ValidatorError};

/// Request body for the identity provider's `/token` endpoint.
#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    grant_type: &'static str,
    refresh_token: &'a str,
}

/// Token endpoint response. Only the credentials are used here.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Exchanges refresh tokens at the identity provider's token endpoint.
///
/// - 200 → new credentials
/// - 400/401/403 → refused (`Ok(None)`)
/// - anything else, or a transport failure → `ValidatorError`
///
/// No timeout or retry is configured here.
#[derive(Clone, Debug)]
pub struct RefreshClient {
    http: reqwest::Client,
    token_url: Url,
}

impl RefreshClient {
    pub fn new(http: reqwest::Client, token_url: Url) -> Self {
        Self { http, token_url }
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<Option<TokenPair>, ValidatorError> {
        let response = self
            .http
            .post(self.token_url.clone())
            .json(&RefreshRequest {
                grant_type: "refresh_token",
                refresh_token,
            })
            .send()
            .await?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            debug!(status = status.as_u16(), "refresh token refused by identity provider");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ValidatorError::UpstreamStatus(status.as_u16()));
        }

        let body: TokenResponse = response.json().await?;
        if body.access_token.trim().is_empty() {
            return Err(ValidatorError::InvalidResponse(
                "empty access_token".to_string(),
            ));
        }

        Ok(Some(TokenPair {
            access_token: body.access_token,
            refresh_token: body.refresh_token.filter(|t| !t.is_empty()),
        }))
    }
}
