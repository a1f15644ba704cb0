//! HTTP client for the car rental API.
//!
//! The caller owns a [`Session`] and hands it to [`ApiClient`]; every call
//! resolves to an [`ApiOutcome`] instead of raising.

pub mod api;
pub mod outcome;
pub mod session;

pub use api::ApiClient;
pub use outcome::{failure_reason, ApiOutcome, NETWORK_ERROR};
pub use session::Session;
