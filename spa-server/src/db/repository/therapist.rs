//! Therapist Repository

use super::{BaseRepository, RepoError, RepoResult, Stamped, make_thing, strip_table_prefix};
use crate::db::models::{Therapist, TherapistCreate, TherapistUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "therapist";

#[derive(Clone)]
pub struct TherapistRepository {
    base: BaseRepository,
}

impl TherapistRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Therapist>> {
        let therapists: Vec<Therapist> = self
            .base
            .db()
            .query("SELECT * FROM therapist ORDER BY name")
            .await?
            .take(0)?;
        Ok(therapists)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Therapist>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let therapist: Option<Therapist> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(therapist)
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Therapist>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM therapist WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let therapists: Vec<Therapist> = result.take(0)?;
        Ok(therapists.into_iter().next())
    }

    pub async fn create(&self, data: TherapistCreate) -> RepoResult<Therapist> {
        // Emails are the business key
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Therapist with email '{}' already exists",
                data.email
            )));
        }

        let now = Utc::now();
        let therapist = Therapist {
            id: None,
            name: data.name,
            email: data.email,
            phone: data.phone,
            specializations: data.specializations,
            certifications: data.certifications,
            experience: data.experience.unwrap_or(0),
            hourly_rate: data.hourly_rate,
            bio: data.bio,
            availability: data.availability,
            is_active: true,
            total_appointments: 0,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Therapist> = self.base.db().create(TABLE).content(therapist).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create therapist".to_string()))
    }

    pub async fn update(&self, id: &str, data: TherapistUpdate) -> RepoResult<Therapist> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Therapist {} not found", id)))?;

        if let Some(ref new_email) = data.email
            && new_email != &existing.email
            && self.find_by_email(new_email).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Therapist with email '{}' already exists",
                new_email
            )));
        }

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
            .ok_or_else(|| RepoError::NotFound(format!("Therapist {} not found", id)))
    }

    pub async fn toggle_active(&self, id: &str) -> RepoResult<Therapist> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Therapist {} not found", id)))?;

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
            .ok_or_else(|| RepoError::NotFound(format!("Therapist {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<Therapist> = self.base.db().delete((TABLE, pure_id)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Therapist {} not found", id)));
        }
        Ok(true)
    }
}
