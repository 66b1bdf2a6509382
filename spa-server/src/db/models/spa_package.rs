//! Spa Package Model
//!
//! Bundles of services sold at a package price. References to services are
//! carried as record links; expansion is left to the client.

use super::serde_thing;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use validator::Validate;

pub type SpaPackageId = Thing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackageType {
    SingleService,
    Bundle,
    Membership,
    PackageDeal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscountType {
    Price,
    Percentage,
}

/// One service line inside a package
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageServiceLine {
    #[serde(with = "serde_thing")]
    pub service: Thing,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    /// Per-line discount percentage (0-100)
    #[serde(default)]
    pub discount: f64,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaPackage {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<SpaPackageId>,
    pub package_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub package_type: PackageType,
    #[serde(default)]
    pub services: Vec<PackageServiceLine>,
    /// Total duration in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<i32>,
    pub original_price: f64,
    #[serde(default = "default_discount_type")]
    pub discount_type: DiscountType,
    #[serde(default)]
    pub discount_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_discount_type() -> DiscountType {
    DiscountType::Percentage
}

fn default_true() -> bool {
    true
}

/// One service line as supplied by the client (service as "table:id" string)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageServiceLineInput {
    pub service: String,
    pub quantity: Option<i32>,
    pub discount: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SpaPackageCreate {
    #[validate(length(min = 1))]
    pub package_name: String,
    pub description: Option<String>,
    pub package_type: PackageType,
    #[serde(default)]
    pub services: Vec<PackageServiceLineInput>,
    #[validate(range(min = 0))]
    pub total_duration: Option<i32>,
    #[validate(range(min = 0.0))]
    pub original_price: f64,
    pub discount_type: Option<DiscountType>,
    #[validate(range(min = 0.0))]
    pub discount_value: Option<f64>,
    #[validate(range(min = 0.0))]
    pub final_price: Option<f64>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SpaPackageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_type: Option<PackageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<PackageServiceLineInput>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub total_duration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub original_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<DiscountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub discount_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub final_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
