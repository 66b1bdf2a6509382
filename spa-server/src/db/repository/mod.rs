//! Repository Module
//!
//! CRUD operations for the spa tables on embedded SurrealDB.

pub mod appointment;
pub mod billing;
pub mod spa_package;
pub mod spa_room;
pub mod spa_service;
pub mod therapist;

pub use appointment::AppointmentRepository;
pub use billing::BillingRepository;
pub use spa_package::SpaPackageRepository;
pub use spa_room::SpaRoomRepository;
pub use spa_service::SpaServiceRepository;
pub use therapist::TherapistRepository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::{Id, Thing};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Build a Thing from a table name and an id that may already carry the
/// "table:" prefix.
pub fn make_thing(table: &str, id: &str) -> Thing {
    let pure = strip_table_prefix(table, id);
    Thing::from((table, Id::from(pure)))
}

/// Extract the pure id if it contains a table prefix
/// (e.g. "spa_service:xxx" -> "xxx").
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// Merge payload with the update timestamp stamped in. Timestamps always
/// travel through serde so stored values stay in one representation.
#[derive(serde::Serialize)]
pub(crate) struct Stamped<T: serde::Serialize> {
    #[serde(flatten)]
    pub data: T,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl<T: serde::Serialize> Stamped<T> {
    pub fn now(data: T) -> Self {
        Self {
            data,
            updated_at: chrono::Utc::now(),
        }
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
