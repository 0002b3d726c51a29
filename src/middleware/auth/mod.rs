pub mod access;

pub use access::{AuthGate, AuthOutcome, Credentials, extract_credentials};
