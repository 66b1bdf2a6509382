//! Therapist Model

use super::serde_thing;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use surrealdb::sql::Thing;
use validator::Validate;

pub type TherapistId = Thing;

/// Professional certification held by a therapist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_number: Option<String>,
}

/// Working window for one weekday, e.g. `{"start": "09:00", "end": "17:00"}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayAvailability {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default)]
    pub available: bool,
}

/// Weekday name -> availability window
pub type WeeklyAvailability = BTreeMap<String, DayAvailability>;

/// Therapist record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Therapist {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<TherapistId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    /// Years of experience
    #[serde(default)]
    pub experience: i32,
    pub hourly_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<WeeklyAvailability>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub total_appointments: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TherapistCreate {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone: String,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[validate(range(min = 0))]
    pub experience: Option<i32>,
    #[validate(range(min = 0.0))]
    pub hourly_rate: f64,
    pub bio: Option<String>,
    pub availability: Option<WeeklyAvailability>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TherapistUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specializations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<Certification>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub experience: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub hourly_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<WeeklyAvailability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
