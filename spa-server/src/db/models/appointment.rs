//! Spa Appointment Model
//!
//! The appointment is the source of truth for priced components
//! (service/therapist/room snapshots); the paired billing record is a
//! derived projection kept in sync by recomputation, not by a transaction.

use super::{SpaRoom, SpaService, Therapist, serde_thing};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use surrealdb::sql::Thing;
use validator::Validate;

pub type AppointmentId = Thing;

/// Appointment lifecycle status
///
/// Transitions are an unconditional set-and-save: any enum value can be
/// written from any other via the status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::InProgress => "in-progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no-show",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "in-progress" => Ok(AppointmentStatus::InProgress),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "no-show" => Ok(AppointmentStatus::NoShow),
            other => Err(format!("Invalid status value: {}", other)),
        }
    }
}

/// Payment status, tracked independently on appointment and billing.
/// `cancelled` only ever appears on billing records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
    Refunded,
    Cancelled,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

/// Spa appointment record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaAppointment {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<AppointmentId>,
    /// Business token, e.g. "APT-1735689600000-k3j9x2m4q"
    pub appointment_id: String,
    #[serde(with = "serde_thing")]
    pub guest_id: Thing,
    pub guest_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,
    /// Hotel room the guest is staying in, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(with = "serde_thing")]
    pub service: Thing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(default, with = "serde_thing::option")]
    pub therapist: Option<Thing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub therapist_name: Option<String>,
    #[serde(default, with = "serde_thing::option")]
    pub spa_room: Option<Thing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spa_room_number: Option<String>,
    #[serde(default, with = "serde_thing::option")]
    pub package: Option<Thing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    pub appointment_date: DateTime<Utc>,
    pub start_time: String,
    pub end_time: String,
    /// Duration in minutes
    pub duration: i32,
    #[serde(default = "default_status")]
    pub status: AppointmentStatus,
    // Price snapshots, denormalized at booking time
    pub service_price: f64,
    #[serde(default)]
    pub therapist_price: f64,
    #[serde(default)]
    pub room_price: f64,
    #[serde(default)]
    pub discount: f64,
    pub total_price: f64,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_notes: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub reminder_sent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_status() -> AppointmentStatus {
    AppointmentStatus::Pending
}

/// Appointment with its service/therapist/room references fetched inline.
/// References that no longer resolve come back as `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentDetail {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<AppointmentId>,
    pub appointment_id: String,
    #[serde(with = "serde_thing")]
    pub guest_id: Thing,
    pub guest_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    pub service: Option<SpaService>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(default)]
    pub therapist: Option<Therapist>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub therapist_name: Option<String>,
    #[serde(default)]
    pub spa_room: Option<SpaRoom>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spa_room_number: Option<String>,
    #[serde(default, with = "serde_thing::option")]
    pub package: Option<Thing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    pub appointment_date: DateTime<Utc>,
    pub start_time: String,
    pub end_time: String,
    pub duration: i32,
    pub status: AppointmentStatus,
    pub service_price: f64,
    #[serde(default)]
    pub therapist_price: f64,
    #[serde(default)]
    pub room_price: f64,
    #[serde(default)]
    pub discount: f64,
    pub total_price: f64,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_notes: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub reminder_sent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppointmentCreate {
    /// Guest record id as "guest:xxx" (or bare id)
    pub guest_id: String,
    #[validate(length(min = 1))]
    pub guest_name: String,
    pub guest_phone: Option<String>,
    pub guest_email: Option<String>,
    pub room_number: Option<String>,
    /// Service record id
    pub service: String,
    pub service_name: Option<String>,
    pub therapist: Option<String>,
    pub therapist_name: Option<String>,
    pub spa_room: Option<String>,
    pub spa_room_number: Option<String>,
    pub package: Option<String>,
    pub package_name: Option<String>,
    pub appointment_date: DateTime<Utc>,
    pub start_time: String,
    pub end_time: String,
    #[validate(range(min = 1))]
    pub duration: i32,
    pub status: Option<AppointmentStatus>,
    #[validate(range(min = 0.0))]
    pub service_price: f64,
    #[validate(range(min = 0.0))]
    pub therapist_price: Option<f64>,
    #[validate(range(min = 0.0))]
    pub room_price: Option<f64>,
    #[validate(range(min = 0.0))]
    pub discount: Option<f64>,
    #[validate(range(min = 0.0))]
    pub total_price: f64,
    pub payment_status: Option<PaymentStatus>,
    pub notes: Option<String>,
    pub special_requests: Option<String>,
    pub health_notes: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub preferences: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppointmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub therapist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub therapist_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spa_room: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spa_room_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub duration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub service_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub therapist_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub room_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub total_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_sent: Option<bool>,
}
