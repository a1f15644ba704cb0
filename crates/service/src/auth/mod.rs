//! Bearer-token verification for owner-scoped routes.
//!
//! Tokens are issued elsewhere; this module only checks the signature and
//! expiry and turns the claims into the acting owner id.

pub mod errors;
pub mod token;

pub use token::{AuthenticatedOwner, Claims, TokenVerifier};
