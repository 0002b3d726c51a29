/*
 * Responsibility
 * - Transport-neutral request/response types shared by both entry points
 * - Cookie parsing and Set-Cookie rendering
 */
pub mod cookie;
pub mod request;
pub mod response;

pub use request::{IncomingEvent, IncomingRequest};
pub use response::{PendingAuthHeaders, ResponseEnvelope};
