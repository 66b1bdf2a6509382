//! Database Module
//!
//! Embedded SurrealDB bootstrap. Production runs on RocksDB under the data
//! directory; tests use the in-memory engine through the same schema setup.

pub mod models;
pub mod repository;

use crate::utils::{AppError, AppResult};
use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "spa";
const DATABASE: &str = "spa";

/// Open the on-disk database and prepare the schema
pub async fn connect(path: &Path) -> AppResult<Surreal<Db>> {
    let db = Surreal::new::<RocksDb>(path)
        .await
        .map_err(|e| AppError::Database(format!("Failed to open database: {e}")))?;
    prepare(&db).await?;
    tracing::info!(path = %path.display(), "Database connection established");
    Ok(db)
}

/// In-memory database with the same schema, for tests
pub async fn connect_memory() -> AppResult<Surreal<Db>> {
    let db = Surreal::new::<Mem>(())
        .await
        .map_err(|e| AppError::Database(format!("Failed to open in-memory database: {e}")))?;
    prepare(&db).await?;
    Ok(db)
}

async fn prepare(db: &Surreal<Db>) -> AppResult<()> {
    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::Database(format!("Failed to select namespace: {e}")))?;
    define_schema(db).await
}

/// Indexes over the spa tables. Tables stay schemaless; only the business
/// keys and the billing lookup are enforced here.
async fn define_schema(db: &Surreal<Db>) -> AppResult<()> {
    db.query(
        "
        DEFINE INDEX IF NOT EXISTS therapist_email ON TABLE therapist COLUMNS email UNIQUE;
        DEFINE INDEX IF NOT EXISTS spa_room_number ON TABLE spa_room COLUMNS room_number UNIQUE;
        DEFINE INDEX IF NOT EXISTS billing_appointment ON TABLE spa_billing COLUMNS appointment;
        ",
    )
    .await
    .map_err(|e| AppError::Database(format!("Failed to define schema: {e}")))?;
    Ok(())
}
