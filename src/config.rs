/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, identity provider, access token 検証設定)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub auth_issuer: String,
    pub auth_audience: String,
    pub access_token_leeway_seconds: u64,
    pub access_jwt_public_key_pem: String,

    // identity provider refresh endpoint
    pub auth_token_url: Url,

    pub body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let auth_issuer = required("AUTH_ISSUER")?;
        let auth_audience = required("AUTH_AUDIENCE")?;

        let access_token_leeway_seconds = lookup("ACCESS_TOKEN_LEEWAY_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        let access_jwt_public_key_pem =
            required("ACCESS_JWT_PUBLIC_KEY_PEM")?.replace("\\n", "\n");

        let auth_token_url = Url::parse(&required("AUTH_TOKEN_URL")?)
            .map_err(|_| ConfigError::Invalid("AUTH_TOKEN_URL"))?;

        let body_limit_bytes = lookup("BODY_LIMIT_BYTES")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(1024 * 1024);

        Ok(Self {
            addr,
            app_env,
            auth_issuer,
            auth_audience,
            access_token_leeway_seconds,
            access_jwt_public_key_pem,
            auth_token_url,
            body_limit_bytes,
        })
    }
}
