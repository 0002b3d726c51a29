use async_trait::async_trait;
use tracing::debug;

use super::{
    Claims, JwtAccessVerifier, RefreshClient, TokenPair, TokenValidator, ValidatorError,
};

/// `TokenValidator` backed by local JWT verification and the identity
/// provider's token endpoint.
#[derive(Clone, Debug)]
pub struct IdentityProvider {
    access: JwtAccessVerifier,
    refresh: RefreshClient,
}

impl IdentityProvider {
    pub fn new(access: JwtAccessVerifier, refresh: RefreshClient) -> Self {
        Self { access, refresh }
    }
}

#[async_trait]
impl TokenValidator for IdentityProvider {
    async fn validate(&self, access_token: &str) -> Result<Option<Claims>, ValidatorError> {
        match self.access.verify(access_token) {
            Ok(claims) => Ok(Some(claims)),
            Err(err) => {
                debug!(error = %err, "access token rejected");
                Ok(None)
            }
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Option<TokenPair>, ValidatorError> {
        self.refresh.refresh(refresh_token).await
    }
}
