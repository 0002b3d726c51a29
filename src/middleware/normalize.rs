//! Path normalization ahead of routing.
//!
//! The platform mounts the same function under `/api` and `/admin`; the route
//! table only knows the `/v1/...` form. Exactly one leading prefix segment is
//! stripped, anything else passes through unchanged.

const PATH_PREFIXES: [&str; 2] = ["/api", "/admin"];

pub fn normalize_path(raw: &str) -> &str {
    for prefix in PATH_PREFIXES {
        if let Some(rest) = raw.strip_prefix(prefix) {
            if rest.is_empty() {
                return "/";
            }
            if rest.starts_with('/') {
                return rest;
            }
        }
    }
    raw
}
