use thiserror::Error;

/// Reasons a bearer credential is refused
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing bearer token")]
    Missing,
    #[error("malformed Authorization header (expect Bearer)")]
    Malformed,
    #[error("token expired")]
    Expired,
    #[error("invalid token: {0}")]
    Invalid(String),
    #[error("token carries no owner identity")]
    NoSubject,
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Missing => 1001,
            AuthError::Malformed => 1002,
            AuthError::Expired => 1003,
            AuthError::Invalid(_) => 1004,
            AuthError::NoSubject => 1005,
        }
    }
}
