//! Cookie header parsing and `Set-Cookie` rendering for auth credentials.
//!
//! The parser is a plain splitter: pairs are separated by `"; "` and each pair
//! is split on its first `"="`, so values may themselves contain `=`.

use std::collections::HashMap;

pub const ACCESS_COOKIE_NAME: &str = "AccessToken";
pub const REFRESH_COOKIE_NAME: &str = "RefreshToken";

/// Lifetime of the access-token cookie, seconds.
pub const ACCESS_COOKIE_MAX_AGE: u64 = 3600;
/// Lifetime of the refresh-token cookie, seconds (30 days).
pub const REFRESH_COOKIE_MAX_AGE: u64 = 2_592_000;

const COOKIE_ATTRIBUTES: &str = "HttpOnly; Secure; SameSite=Strict; Path=/";

/// Parse a `Cookie` header value into a name → value mapping.
///
/// Segments without `=` are skipped. A later duplicate name overwrites an
/// earlier one.
pub fn parse_cookie_header(raw: &str) -> HashMap<String, String> {
    raw.split("; ")
        .filter_map(|pair| pair.split_once('='))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

/// Render a `Set-Cookie` value for a credential cookie.
pub fn credential_cookie(name: &str, value: &str, max_age: u64) -> String {
    format!("{name}={value}; {COOKIE_ATTRIBUTES}; Max-Age={max_age}")
}

pub fn access_token_cookie(token: &str) -> String {
    credential_cookie(ACCESS_COOKIE_NAME, token, ACCESS_COOKIE_MAX_AGE)
}

pub fn refresh_token_cookie(token: &str) -> String {
    credential_cookie(REFRESH_COOKIE_NAME, token, REFRESH_COOKIE_MAX_AGE)
}
