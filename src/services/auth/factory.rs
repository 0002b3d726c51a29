/// Factory: build the identity-provider `TokenValidator` from application `Config`.
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::services::auth::{IdentityProvider, JwtAccessVerifier, RefreshClient, TokenValidator};

pub fn build_token_validator(config: &Config) -> Result<Arc<dyn TokenValidator>> {
    let access = JwtAccessVerifier::new(
        &config.access_jwt_public_key_pem,
        &config.auth_issuer,
        &config.auth_audience,
        config.access_token_leeway_seconds,
    )
    .context("building access token verifier")?;

    let http = reqwest::Client::builder()
        .build()
        .context("building identity provider http client")?;
    let refresh = RefreshClient::new(http, config.auth_token_url.clone());

    Ok(Arc::new(IdentityProvider::new(access, refresh)))
}
