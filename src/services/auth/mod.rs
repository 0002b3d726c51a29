pub mod access_jwt;
pub mod factory;
pub mod identity_provider;
pub mod refresh_client;
pub mod validator;

pub use access_jwt::{AccessJwtError, JwtAccessVerifier};
pub use factory::build_token_validator;
pub use identity_provider::IdentityProvider;
pub use refresh_client::RefreshClient;
pub use validator::{Claims, TokenPair, TokenValidator, ValidatorError};
