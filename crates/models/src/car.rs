use sea_orm::{entity::prelude::*, ActiveModelTrait, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

pub const MAX_TEXT_LEN: usize = 128;
pub const MAX_RENTER_LEN: usize = 255;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "car")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub is_available: bool,
    pub renter: Option<String>,
    pub user_id: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for common::types::car::Car {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            make: m.make,
            model: m.model,
            availability: common::types::car::Availability { is_available: m.is_available, renter: m.renter },
            user_id: m.user_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn validate_text(field: &str, value: &str) -> Result<String, errors::ModelError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(errors::ModelError::Validation(format!("{field} required")));
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(errors::ModelError::Validation(format!("{field} too long (<= {MAX_TEXT_LEN})")));
    }
    Ok(trimmed.to_string())
}

pub fn validate_make(make: &str) -> Result<String, errors::ModelError> {
    validate_text("make", make)
}

pub fn validate_model(model: &str) -> Result<String, errors::ModelError> {
    validate_text("model", model)
}

pub fn validate_owner(user_id: &str) -> Result<(), errors::ModelError> {
    if user_id.trim().is_empty() {
        return Err(errors::ModelError::Validation("user_id required".into()));
    }
    if user_id.chars().count() > MAX_TEXT_LEN {
        return Err(errors::ModelError::Validation(format!("user_id too long (<= {MAX_TEXT_LEN})")));
    }
    Ok(())
}

/// Blank renters collapse to `None`.
pub fn normalize_renter(renter: Option<&str>) -> Result<Option<String>, errors::ModelError> {
    match renter.map(str::trim) {
        None | Some("") => Ok(None),
        Some(r) if r.chars().count() > MAX_RENTER_LEN => {
            Err(errors::ModelError::Validation(format!("renter too long (<= {MAX_RENTER_LEN})")))
        }
        Some(r) => Ok(Some(r.to_string())),
    }
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    make: &str,
    model: &str,
    is_available: bool,
    renter: Option<&str>,
) -> Result<Model, errors::ModelError> {
    validate_owner(user_id)?;
    let make = validate_make(make)?;
    let model = validate_model(model)?;
    let renter = normalize_renter(renter)?;

    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        make: Set(make),
        model: Set(model),
        is_available: Set(is_available),
        renter: Set(renter),
        user_id: Set(user_id.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
