//! Spa Billing Model
//!
//! An invoice derived from an appointment's price snapshots. The record is
//! recomputed from scratch whenever the appointment changes; only
//! `amount_paid` survives a regeneration.

use super::appointment::{PaymentStatus, SpaAppointment};
use super::serde_thing;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use validator::Validate;

pub type SpaBillingId = Thing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
    Cheque,
    Other,
}

/// One invoice line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingItem {
    pub description: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    pub unit_price: f64,
    pub subtotal: f64,
}

fn default_quantity() -> i32 {
    1
}

/// Invoice record paired to an appointment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaBilling {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<SpaBillingId>,
    /// Business token, e.g. "BIL-1735689600000-k3j9x2m4q"
    pub billing_id: String,
    #[serde(with = "serde_thing")]
    pub appointment: Thing,
    #[serde(with = "serde_thing")]
    pub guest_id: Thing,
    pub guest_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_address: Option<String>,
    pub invoice_date: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<BillingItem>,
    pub subtotal: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub discount: f64,
    pub total: f64,
    #[serde(default)]
    pub amount_paid: f64,
    pub amount_due: f64,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Billing with its appointment reference fetched inline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingDetail {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<SpaBillingId>,
    pub billing_id: String,
    pub appointment: Option<SpaAppointment>,
    #[serde(with = "serde_thing")]
    pub guest_id: Thing,
    pub guest_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_address: Option<String>,
    pub invoice_date: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<BillingItem>,
    pub subtotal: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub discount: f64,
    pub total: f64,
    #[serde(default)]
    pub amount_paid: f64,
    pub amount_due: f64,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Manually created invoice, independent of the derivation path. The
/// `billing_id` token is generated server-side.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BillingCreate {
    /// Appointment record id as "spa_appointment:xxx" (or bare id)
    pub appointment: String,
    pub guest_id: String,
    #[validate(length(min = 1))]
    pub guest_name: String,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub guest_address: Option<String>,
    pub invoice_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<BillingItem>,
    #[validate(range(min = 0.0))]
    pub subtotal: f64,
    #[validate(range(min = 0.0))]
    pub tax: Option<f64>,
    #[validate(range(min = 0.0))]
    pub discount: Option<f64>,
    pub total: f64,
    #[validate(range(min = 0.0))]
    pub amount_paid: Option<f64>,
    pub amount_due: f64,
    pub payment_status: Option<PaymentStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Direct edits to a billing record. Monetary fields written here are taken
/// as-is; nothing is pushed back onto the appointment.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BillingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<BillingItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub subtotal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub tax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub amount_paid: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_due: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}
