use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use common::types::car::{Car, CarPatch, NewCar};

use crate::outcome::{failure_reason, ApiOutcome, NETWORK_ERROR};
use crate::session::Session;

const CARS_PATH: &str = "/api/cars";
const NOT_LOGGED_IN: &str = "You must be logged in";

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url, session: None }
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Send one request and decode the JSON reply.
    ///
    /// With `auth` set the session token goes out as a bearer header; a
    /// client without a session fails without touching the network.
    /// Empty success bodies decode as JSON `null`, so `T = ()` fits 204s.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        auth: bool,
    ) -> ApiOutcome<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method.clone(), &url);
        if auth {
            match &self.session {
                Some(s) => req = req.bearer_auth(&s.token),
                None => return ApiOutcome::Failure(NOT_LOGGED_IN.to_string()),
            }
        }
        if let Some(b) = body {
            req = req.json(&b);
        }

        let resp = match req.send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(%method, %url, err = %e, "request failed");
                return ApiOutcome::Failure(NETWORK_ERROR.to_string());
            }
        };
        let status = resp.status();
        let bytes = match resp.bytes().await {
            Ok(b) => b,
            Err(e) => {
                warn!(%method, %url, err = %e, "reading response body failed");
                return ApiOutcome::Failure(NETWORK_ERROR.to_string());
            }
        };
        let parsed: Option<Value> = if bytes.is_empty() { None } else { serde_json::from_slice(&bytes).ok() };
        debug!(%method, %url, status = status.as_u16(), "response received");

        if !status.is_success() {
            return ApiOutcome::Failure(failure_reason(status, parsed.as_ref()));
        }
        match serde_json::from_value::<T>(parsed.unwrap_or(Value::Null)) {
            Ok(v) => ApiOutcome::Success(v),
            Err(e) => {
                warn!(%method, %url, err = %e, "unexpected response body");
                ApiOutcome::Failure(format!("Unexpected response: {e}"))
            }
        }
    }

    pub async fn list_cars(&self) -> ApiOutcome<Vec<Car>> {
        self.request(Method::GET, CARS_PATH, None, false).await
    }

    pub async fn get_car(&self, id: &str) -> ApiOutcome<Car> {
        self.request(Method::GET, &format!("{CARS_PATH}/{id}"), None, false).await
    }

    pub async fn create_car(&self, car: &NewCar) -> ApiOutcome<Car> {
        match to_body(car) {
            Ok(body) => self.request(Method::POST, CARS_PATH, Some(body), true).await,
            Err(reason) => ApiOutcome::Failure(reason),
        }
    }

    pub async fn update_car(&self, id: &str, patch: &CarPatch) -> ApiOutcome<Car> {
        match to_body(patch) {
            Ok(body) => self.request(Method::PUT, &format!("{CARS_PATH}/{id}"), Some(body), true).await,
            Err(reason) => ApiOutcome::Failure(reason),
        }
    }

    pub async fn delete_car(&self, id: &str) -> ApiOutcome<()> {
        self.request(Method::DELETE, &format!("{CARS_PATH}/{id}"), None, true).await
    }

    /// Post credentials to an auth endpoint (login or signup) and return the
    /// session it issues. The client itself is left unchanged.
    pub async fn authenticate<C: Serialize + ?Sized>(&self, path: &str, credentials: &C) -> ApiOutcome<Session> {
        match to_body(credentials) {
            Ok(body) => self.request(Method::POST, path, Some(body), false).await,
            Err(reason) => ApiOutcome::Failure(reason),
        }
    }
}

fn to_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, String> {
    serde_json::to_value(body).map_err(|e| format!("Invalid request body: {e}"))
}
