use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::utils::AppResult;

/// Shared server state handed to every handler
///
/// Cloning is cheap: the database handle and JWT service are shared
/// references.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    /// Embedded SurrealDB handle
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Construct state from already-built components
    pub fn new(config: Config, db: Surreal<Db>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            db,
            jwt_service,
        }
    }

    /// Open the on-disk database under the work dir and build the state
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let data_dir = config.data_dir();
        if let Err(e) = std::fs::create_dir_all(&data_dir) {
            tracing::warn!(path = %data_dir.display(), error = %e, "could not create data dir");
        }

        let db = crate::db::connect(&data_dir).await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self::new(config.clone(), db, jwt_service))
    }

    /// State backed by an in-memory database, for tests
    pub async fn initialize_in_memory(config: &Config) -> AppResult<Self> {
        let db = crate::db::connect_memory().await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Ok(Self::new(config.clone(), db, jwt_service))
    }
}
