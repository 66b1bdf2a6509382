//! Spa Service Repository

use super::{BaseRepository, RepoError, RepoResult, Stamped, make_thing, strip_table_prefix};
use crate::db::models::{SpaService, SpaServiceCreate, SpaServiceUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "spa_service";

#[derive(Clone)]
pub struct SpaServiceRepository {
    base: BaseRepository,
}

impl SpaServiceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All services, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<SpaService>> {
        let services: Vec<SpaService> = self
            .base
            .db()
            .query("SELECT * FROM spa_service ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(services)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<SpaService>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let service: Option<SpaService> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(service)
    }

    pub async fn create(&self, data: SpaServiceCreate) -> RepoResult<SpaService> {
        let now = Utc::now();
        let service = SpaService {
            id: None,
            service_name: data.service_name,
            category: data.category,
            description: data.description,
            duration: data.duration,
            base_price: data.base_price,
            is_active: true,
            max_capacity: data.max_capacity.unwrap_or(1),
            benefits: data.benefits,
            created_at: now,
            updated_at: now,
        };

        let created: Option<SpaService> = self.base.db().create(TABLE).content(service).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create service".to_string()))
    }

    pub async fn update(&self, id: &str, data: SpaServiceUpdate) -> RepoResult<SpaService> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Service {} not found", id)))?;

        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let thing = make_thing(TABLE, &pure_id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing))
            .bind(("data", Stamped::now(data)))
            .await?;

        self.find_by_id(&pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Service {} not found", id)))
    }

    /// Flip is_active and return the new value
    pub async fn toggle_active(&self, id: &str) -> RepoResult<SpaService> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Service {} not found", id)))?;

        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let thing = make_thing(TABLE, &pure_id);
        self.base
            .db()
            .query("UPDATE $thing MERGE { is_active: $active, updated_at: $now }")
            .bind(("thing", thing))
            .bind(("active", !existing.is_active))
            .bind(("now", chrono::Utc::now()))
            .await?;

        self.find_by_id(&pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Service {} not found", id)))
    }

    /// Hard delete
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<SpaService> = self.base.db().delete((TABLE, pure_id)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Service {} not found", id)));
        }
        Ok(true)
    }
}
