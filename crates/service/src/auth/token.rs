use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use super::errors::AuthError;

const BEARER_PREFIX: &str = "Bearer ";

/// JWT claims understood by the verifier.
///
/// The owner is `uid` when present, otherwise `sub`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub exp: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<usize>,
}

impl Claims {
    pub fn owner_id(&self) -> Option<&str> {
        [self.uid.as_deref(), self.sub.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
    }
}

/// Identity of the caller, attached to requests on protected routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedOwner {
    pub owner_id: String,
}

/// HS256 verifier with expiry checking.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;
        Self { key: DecodingKey::from_secret(secret.as_bytes()), validation }
    }

    pub fn verify(&self, token: &str) -> Result<AuthenticatedOwner, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::Invalid(e.to_string()),
        })?;
        let owner_id = data.claims.owner_id().ok_or(AuthError::NoSubject)?;
        Ok(AuthenticatedOwner { owner_id: owner_id.to_string() })
    }

    /// Verify the value of an `Authorization` header.
    pub fn verify_header(&self, header: &str) -> Result<AuthenticatedOwner, AuthError> {
        self.verify(bearer_token(header)?)
    }
}

/// Strip the `Bearer ` scheme (any case) from an `Authorization` header value.
pub fn bearer_token(header: &str) -> Result<&str, AuthError> {
    let token = match header.get(..BEARER_PREFIX.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(BEARER_PREFIX) => header[BEARER_PREFIX.len()..].trim(),
        _ => return Err(AuthError::Malformed),
    };
    if token.is_empty() {
        return Err(AuthError::Missing);
    }
    Ok(token)
}
