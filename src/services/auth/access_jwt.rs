use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};
use thiserror::Error;

use super::Claims;

// Errors returned by access-token verification + strict claim validation.
#[derive(Debug, Error)]
pub enum AccessJwtError {
    #[error("invalid ed25519 public key pem: {0}")]
    InvalidKey(jsonwebtoken::errors::Error),
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("empty '{0}' claim")]
    EmptyClaim(&'static str),
}

/// EdDSA (Ed25519) access-token verifier.
///
/// - `jsonwebtoken::Validation` checks signature, `exp`, `iss` and `aud`
///   (with leeway).
/// - `verify` additionally requires a non-empty `sub`.
/// - Debug output omits key material.
#[derive(Clone)]
pub struct JwtAccessVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtAccessVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwtAccessVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtAccessVerifier {
    pub fn new(
        access_public_key_pem: &str,
        issuer: &str,
        audience: &str,
        leeway_seconds: u64,
    ) -> Result<Self, AccessJwtError> {
        let decoding_key = DecodingKey::from_ed_pem(access_public_key_pem.as_bytes())
            .map_err(AccessJwtError::InvalidKey)?;

        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Verify a JWT access token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AccessJwtError> {
        let data = jsonwebtoken::decode::<Map<String, Value>>(
            token,
            &self.decoding_key,
            &self.validation,
        )?;

        let has_subject = data
            .claims
            .get("sub")
            .and_then(Value::as_str)
            .is_some_and(|sub| !sub.trim().is_empty());
        if !has_subject {
            return Err(AccessJwtError::EmptyClaim("sub"));
        }

        Claims::from_map(data.claims).ok_or(AccessJwtError::EmptyClaim("sub"))
    }
}
