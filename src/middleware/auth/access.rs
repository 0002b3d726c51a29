//! access token 検証 + silent refresh → Claims
//!
//! Transitions:
//! - no access token                           → Failed (validator not called)
//! - access token valid                        → Authenticated
//! - access token invalid, no refresh token    → Failed
//! - access token invalid, refresh token       → refresh → validate new token
//!                                               → Authenticated (+ Set-Cookie) | Failed
//!
//! Identity-provider errors end in Failed as well. The caller only ever sees
//! `Unauthenticated`; the reason goes to the log.

use std::sync::Arc;

use axum::http::header;
use tracing::{debug, warn};

use crate::http::cookie::{
    ACCESS_COOKIE_NAME, REFRESH_COOKIE_NAME, access_token_cookie, refresh_token_cookie,
};
use crate::http::{IncomingRequest, PendingAuthHeaders};
use crate::services::auth::{Claims, TokenValidator, ValidatorError};

const SET_COOKIE: &str = "Set-Cookie";

/// Credentials found on a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

/// Access token from `Authorization: Bearer <token>`, falling back to the
/// `AccessToken` cookie. The refresh token always comes from the
/// `RefreshToken` cookie.
pub fn extract_credentials(req: &IncomingRequest) -> Credentials {
    let non_empty = |v: &str| {
        let v = v.trim();
        (!v.is_empty()).then(|| v.to_string())
    };

    let bearer = req
        .header(header::AUTHORIZATION.as_str())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(non_empty);

    let access_token = bearer.or_else(|| req.cookie(ACCESS_COOKIE_NAME).and_then(non_empty));
    let refresh_token = req.cookie(REFRESH_COOKIE_NAME).and_then(non_empty);

    Credentials {
        access_token,
        refresh_token,
    }
}

/// Result of the auth step.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    Authenticated {
        claims: Claims,
        /// Set only after a silent refresh; must be merged into this
        /// request's response.
        pending: Option<PendingAuthHeaders>,
    },
    Unauthenticated,
}

impl AuthOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthOutcome::Authenticated { .. })
    }
}

#[derive(Clone)]
pub struct AuthGate {
    validator: Arc<dyn TokenValidator>,
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate").finish_non_exhaustive()
    }
}

impl AuthGate {
    pub fn new(validator: Arc<dyn TokenValidator>) -> Self {
        Self { validator }
    }

    pub async fn authenticate(&self, req: &IncomingRequest) -> AuthOutcome {
        let credentials = extract_credentials(req);

        match self.authenticate_credentials(&credentials).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "identity provider failure during authentication");
                AuthOutcome::Unauthenticated
            }
        }
    }

    async fn authenticate_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthOutcome, ValidatorError> {
        let Some(access_token) = credentials.access_token.as_deref() else {
            debug!("no access token on request");
            return Ok(AuthOutcome::Unauthenticated);
        };

        if let Some(claims) = self.validator.validate(access_token).await? {
            return Ok(AuthOutcome::Authenticated {
                claims,
                pending: None,
            });
        }

        let Some(refresh_token) = credentials.refresh_token.as_deref() else {
            warn!("access token invalid and no refresh token present");
            return Ok(AuthOutcome::Unauthenticated);
        };

        let Some(pair) = self.validator.refresh(refresh_token).await? else {
            warn!("refresh token refused");
            return Ok(AuthOutcome::Unauthenticated);
        };

        let Some(claims) = self.validator.validate(&pair.access_token).await? else {
            warn!("refreshed access token failed validation");
            return Ok(AuthOutcome::Unauthenticated);
        };

        let mut pending = PendingAuthHeaders::new();
        pending.append(SET_COOKIE, access_token_cookie(&pair.access_token));
        if let Some(refresh_token) = pair.refresh_token.as_deref() {
            pending.append(SET_COOKIE, refresh_token_cookie(refresh_token));
        }

        debug!(subject = ?claims.subject(), "access token refreshed");

        Ok(AuthOutcome::Authenticated {
            claims,
            pending: Some(pending),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::http::Method;
    use serde_json::json;

    use super::*;
    use crate::services::auth::TokenPair;

    /// Validator scripted by token value: `good*` tokens are valid, refresh
    /// tokens starting with `rt-` are exchanged, `boom` errors.
    #[derive(Default)]
    struct ScriptedValidator {
        calls: Mutex<Vec<String>>,
        rotate_refresh: bool,
    }

    impl ScriptedValidator {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TokenValidator for ScriptedValidator {
        async fn validate(&self, token: &str) -> Result<Option<Claims>, ValidatorError> {
            self.calls.lock().unwrap().push(format!("validate:{token}"));
            if token == "boom" {
                return Err(ValidatorError::UpstreamStatus(503));
            }
            Ok(token.starts_with("good").then(|| {
                Claims::from_map(json!({ "sub": token }).as_object().cloned().unwrap()).unwrap()
            }))
        }

        async fn refresh(&self, token: &str) -> Result<Option<TokenPair>, ValidatorError> {
            self.calls.lock().unwrap().push(format!("refresh:{token}"));
            if token == "rt-boom" {
                return Err(ValidatorError::UpstreamStatus(502));
            }
            Ok(token.starts_with("rt-").then(|| TokenPair {
                access_token: "good-new".to_string(),
                refresh_token: self.rotate_refresh.then(|| "rt-new".to_string()),
            }))
        }
    }

    fn gate(validator: &Arc<ScriptedValidator>) -> AuthGate {
        AuthGate::new(validator.clone())
    }

    fn request() -> IncomingRequest {
        IncomingRequest::new(Method::GET, "/v1/cart")
    }

    #[test]
    fn bearer_header_wins_over_cookie() {
        let req = request()
            .with_header("Authorization", "Bearer from-header")
            .with_header("Cookie", "AccessToken=from-cookie; RefreshToken=rt-1");
        assert_eq!(
            extract_credentials(&req),
            Credentials {
                access_token: Some("from-header".to_string()),
                refresh_token: Some("rt-1".to_string()),
            }
        );
    }

    #[test]
    fn empty_bearer_falls_back_to_cookie() {
        let req = request()
            .with_header("Authorization", "Bearer ")
            .with_header("Cookie", "AccessToken=from-cookie");
        assert_eq!(
            extract_credentials(&req).access_token.as_deref(),
            Some("from-cookie")
        );
    }

    #[test]
    fn non_bearer_scheme_falls_back_to_cookie() {
        let req = request()
            .with_header("Authorization", "Basic dXNlcjpwYXNz")
            .with_header("Cookie", "AccessToken=from-cookie");
        assert_eq!(
            extract_credentials(&req).access_token.as_deref(),
            Some("from-cookie")
        );
    }

    #[test]
    fn nothing_to_extract() {
        assert_eq!(extract_credentials(&request()), Credentials::default());
    }

    #[tokio::test]
    async fn missing_credentials_fail_without_calling_validator() {
        let validator = Arc::new(ScriptedValidator::default());
        let outcome = gate(&validator).authenticate(&request()).await;

        assert_eq!(outcome, AuthOutcome::Unauthenticated);
        assert!(validator.calls().is_empty());
    }

    #[tokio::test]
    async fn valid_access_token_emits_no_headers() {
        let validator = Arc::new(ScriptedValidator::default());
        let req = request().with_header("Authorization", "Bearer good-1");

        match gate(&validator).authenticate(&req).await {
            AuthOutcome::Authenticated { claims, pending } => {
                assert_eq!(claims.subject(), Some("good-1"));
                assert!(pending.is_none());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(validator.calls(), vec!["validate:good-1"]);
    }

    #[tokio::test]
    async fn invalid_access_token_without_refresh_fails() {
        let validator = Arc::new(ScriptedValidator::default());
        let req = request().with_header("Cookie", "AccessToken=expired");

        let outcome = gate(&validator).authenticate(&req).await;
        assert_eq!(outcome, AuthOutcome::Unauthenticated);
        assert_eq!(validator.calls(), vec!["validate:expired"]);
    }

    #[tokio::test]
    async fn silent_refresh_sets_access_cookie() {
        let validator = Arc::new(ScriptedValidator::default());
        let req = request().with_header("Cookie", "AccessToken=expired; RefreshToken=rt-1");

        match gate(&validator).authenticate(&req).await {
            AuthOutcome::Authenticated { claims, pending } => {
                assert_eq!(claims.subject(), Some("good-new"));
                let pending = pending.unwrap();
                assert_eq!(
                    pending.get("Set-Cookie").unwrap(),
                    ["AccessToken=good-new; HttpOnly; Secure; SameSite=Strict; Path=/; Max-Age=3600"]
                );
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(
            validator.calls(),
            vec!["validate:expired", "refresh:rt-1", "validate:good-new"]
        );
    }

    #[tokio::test]
    async fn rotated_refresh_token_adds_second_cookie() {
        let validator = Arc::new(ScriptedValidator {
            rotate_refresh: true,
            ..Default::default()
        });
        let req = request()
            .with_header("Authorization", "Bearer expired")
            .with_header("Cookie", "RefreshToken=rt-1");

        let AuthOutcome::Authenticated { pending, .. } = gate(&validator).authenticate(&req).await
        else {
            panic!("expected authentication");
        };
        let pending = pending.unwrap();
        let cookies = pending.get("Set-Cookie").unwrap();
        assert_eq!(cookies.len(), 2);
        assert!(cookies[0].starts_with("AccessToken=good-new;"));
        assert!(cookies[0].ends_with("Max-Age=3600"));
        assert!(cookies[1].starts_with("RefreshToken=rt-new;"));
        assert!(cookies[1].ends_with("Max-Age=2592000"));
    }

    #[tokio::test]
    async fn refused_refresh_fails() {
        let validator = Arc::new(ScriptedValidator::default());
        let req = request().with_header("Cookie", "AccessToken=expired; RefreshToken=revoked");

        assert_eq!(
            gate(&validator).authenticate(&req).await,
            AuthOutcome::Unauthenticated
        );
    }

    #[tokio::test]
    async fn validator_errors_become_unauthenticated() {
        let validator = Arc::new(ScriptedValidator::default());

        let req = request().with_header("Authorization", "Bearer boom");
        assert!(!gate(&validator).authenticate(&req).await.is_authenticated());

        let req = request().with_header("Cookie", "AccessToken=expired; RefreshToken=rt-boom");
        assert!(!gate(&validator).authenticate(&req).await.is_authenticated());
    }
}
