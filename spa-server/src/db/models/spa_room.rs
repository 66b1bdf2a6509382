//! Spa Room Model

use super::serde_thing;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use validator::Validate;

pub type SpaRoomId = Thing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpaRoomType {
    Single,
    Double,
    Suite,
    Vip,
}

/// Operational state of a treatment room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpaRoomStatus {
    Available,
    Occupied,
    Maintenance,
    Reserved,
}

/// Treatment room record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaRoom {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<SpaRoomId>,
    pub room_number: String,
    pub room_type: SpaRoomType,
    pub capacity: i32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_status")]
    pub status: SpaRoomStatus,
    pub hourly_rate: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_status() -> SpaRoomStatus {
    SpaRoomStatus::Available
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SpaRoomCreate {
    #[validate(length(min = 1))]
    pub room_number: String,
    pub room_type: SpaRoomType,
    #[validate(range(min = 1))]
    pub capacity: i32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub status: Option<SpaRoomStatus>,
    #[validate(range(min = 0.0))]
    pub hourly_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SpaRoomUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<SpaRoomType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SpaRoomStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub hourly_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
