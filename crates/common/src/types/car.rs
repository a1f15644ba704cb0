//! Car wire types, shared by the HTTP surface and the API client.
//!
//! Field names follow the JSON the frontend already speaks:
//! `availability.isAvailable`, `user_id`, `createdAt`, `updatedAt`.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

fn default_available() -> bool { true }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    #[serde(rename = "isAvailable", default = "default_available")]
    pub is_available: bool,
    #[serde(default)]
    pub renter: Option<String>,
}

impl Default for Availability {
    fn default() -> Self {
        Self { is_available: true, renter: None }
    }
}

/// A stored car as returned by every read and write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub availability: Availability,
    pub user_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<FixedOffset>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<FixedOffset>,
}

/// Creation body. Owner and timestamps are never taken from the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewCar {
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub availability: Availability,
}

impl NewCar {
    pub fn new(make: impl Into<String>, model: impl Into<String>) -> Self {
        Self { make: make.into(), model: model.into(), availability: Availability::default() }
    }
}

/// Partial update. `availability` replaces the whole sub-record when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "explicit_availability")]
    pub availability: Option<Availability>,
}

/// A patch replaces the whole sub-record, so `isAvailable` must be stated.
fn explicit_availability<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Availability>, D::Error> {
    #[derive(Deserialize)]
    struct Explicit {
        #[serde(rename = "isAvailable")]
        is_available: bool,
        #[serde(default)]
        renter: Option<String>,
    }
    let explicit = Option::<Explicit>::deserialize(d)?;
    Ok(explicit.map(|a| Availability { is_available: a.is_available, renter: a.renter }))
}

impl CarPatch {
    pub fn is_empty(&self) -> bool {
        self.make.is_none() && self.model.is_none() && self.availability.is_none()
    }
}
