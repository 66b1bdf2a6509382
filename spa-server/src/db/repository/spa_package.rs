//! Spa Package Repository

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{
    DiscountType, PackageServiceLine, PackageServiceLineInput, SpaPackage, SpaPackageCreate,
    SpaPackageUpdate,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

const TABLE: &str = "spa_package";
const SERVICE_TABLE: &str = "spa_service";

#[derive(Clone)]
pub struct SpaPackageRepository {
    base: BaseRepository,
}

fn service_lines(inputs: Vec<PackageServiceLineInput>) -> Vec<PackageServiceLine> {
    inputs
        .into_iter()
        .map(|line| PackageServiceLine {
            service: make_thing(SERVICE_TABLE, &line.service),
            quantity: line.quantity.unwrap_or(1),
            discount: line.discount.unwrap_or(0.0),
        })
        .collect()
}

impl SpaPackageRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<SpaPackage>> {
        let packages: Vec<SpaPackage> = self
            .base
            .db()
            .query("SELECT * FROM spa_package ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(packages)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<SpaPackage>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let package: Option<SpaPackage> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(package)
    }

    pub async fn create(&self, data: SpaPackageCreate) -> RepoResult<SpaPackage> {
        let now = Utc::now();
        let package = SpaPackage {
            id: None,
            package_name: data.package_name,
            description: data.description,
            package_type: data.package_type,
            services: service_lines(data.services),
            total_duration: data.total_duration,
            original_price: data.original_price,
            discount_type: data.discount_type.unwrap_or(DiscountType::Percentage),
            discount_value: data.discount_value.unwrap_or(0.0),
            final_price: data.final_price,
            valid_from: data.valid_from,
            valid_until: data.valid_until,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created: Option<SpaPackage> = self.base.db().create(TABLE).content(package).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create package".to_string()))
    }

    pub async fn update(&self, id: &str, data: SpaPackageUpdate) -> RepoResult<SpaPackage> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Package {} not found", id)))?;

        // Service ids come in as strings, record links go out as Things
        #[derive(Serialize)]
        struct SpaPackageUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            package_name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            package_type: Option<crate::db::models::PackageType>,
            #[serde(skip_serializing_if = "Option::is_none")]
            services: Option<Vec<PackageServiceLine>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            total_duration: Option<i32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            original_price: Option<f64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            discount_type: Option<DiscountType>,
            #[serde(skip_serializing_if = "Option::is_none")]
            discount_value: Option<f64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            final_price: Option<f64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            valid_from: Option<DateTime<Utc>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            valid_until: Option<DateTime<Utc>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_active: Option<bool>,
            updated_at: DateTime<Utc>,
        }

        let update_data = SpaPackageUpdateDb {
            package_name: data.package_name,
            description: data.description,
            package_type: data.package_type,
            services: data.services.map(service_lines),
            total_duration: data.total_duration,
            original_price: data.original_price,
            discount_type: data.discount_type,
            discount_value: data.discount_value,
            final_price: data.final_price,
            valid_from: data.valid_from,
            valid_until: data.valid_until,
            is_active: data.is_active,
            updated_at: Utc::now(),
        };

        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let thing: Thing = make_thing(TABLE, &pure_id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing))
            .bind(("data", update_data))
            .await?;

        self.find_by_id(&pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Package {} not found", id)))
    }

    pub async fn toggle_active(&self, id: &str) -> RepoResult<SpaPackage> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Package {} not found", id)))?;

        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let thing = make_thing(TABLE, &pure_id);
        self.base
            .db()
            .query("UPDATE $thing MERGE { is_active: $active, updated_at: $now }")
            .bind(("thing", thing))
            .bind(("active", !existing.is_active))
            .bind(("now", Utc::now()))
            .await?;

        self.find_by_id(&pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Package {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<SpaPackage> = self.base.db().delete((TABLE, pure_id)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Package {} not found", id)));
        }
        Ok(true)
    }
}
