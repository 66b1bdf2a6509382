//! Spa Service Model

use super::serde_thing;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use validator::Validate;

pub type SpaServiceId = Thing;

/// Treatment category offered by the spa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceCategory {
    Massage,
    Facial,
    BodyTreatment,
    Therapy,
    Wellness,
    Other,
}

/// Spa service catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaService {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<SpaServiceId>,
    pub service_name: String,
    pub category: ServiceCategory,
    pub description: String,
    /// Duration in minutes
    pub duration: i32,
    pub base_price: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Guests that can take the service at once
    #[serde(default = "default_capacity")]
    pub max_capacity: i32,
    #[serde(default)]
    pub benefits: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

fn default_capacity() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SpaServiceCreate {
    #[validate(length(min = 1))]
    pub service_name: String,
    pub category: ServiceCategory,
    pub description: String,
    /// Duration in minutes (15 min to 8 hours)
    #[validate(range(min = 15, max = 480))]
    pub duration: i32,
    #[validate(range(min = 0.0))]
    pub base_price: f64,
    #[validate(range(min = 1, max = 10))]
    pub max_capacity: Option<i32>,
    #[serde(default)]
    pub benefits: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SpaServiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ServiceCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 15, max = 480))]
    pub duration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub base_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 10))]
    pub max_capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefits: Option<Vec<String>>,
}
