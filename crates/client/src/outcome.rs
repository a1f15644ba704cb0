use reqwest::StatusCode;
use serde_json::Value;

pub const NETWORK_ERROR: &str = "Network error. Please try again.";

/// Result of one API call: the decoded body, or a reason fit for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    Success(T),
    Failure(String),
}

impl<T> ApiOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiOutcome::Success(_))
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ApiOutcome::Success(_) => None,
            ApiOutcome::Failure(r) => Some(r),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            ApiOutcome::Success(v) => Ok(v),
            ApiOutcome::Failure(r) => Err(r),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiOutcome<U> {
        match self {
            ApiOutcome::Success(v) => ApiOutcome::Success(f(v)),
            ApiOutcome::Failure(r) => ApiOutcome::Failure(r),
        }
    }
}

fn text_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str).map(str::trim).filter(|s| !s.is_empty())
}

/// Body `error`, then body `message`, then a default for the status.
pub fn failure_reason(status: StatusCode, body: Option<&Value>) -> String {
    if let Some(reason) = body.and_then(|b| text_field(b, "error").or_else(|| text_field(b, "message"))) {
        return reason.to_string();
    }
    match status {
        StatusCode::UNAUTHORIZED => "Authentication failed".to_string(),
        StatusCode::NOT_FOUND => "Not found".to_string(),
        StatusCode::BAD_REQUEST => "Invalid request".to_string(),
        s if s.is_server_error() => "Server error. Please try again later.".to_string(),
        s => format!("Request failed with status {}", s.as_u16()),
    }
}
