//! Spa Server - hotel spa back-office API
//!
//! Embedded-database REST server managing the spa catalog (services,
//! therapists, rooms, packages), guest appointments and the invoices derived
//! from them.
//!
//! # Module layout
//!
//! ```text
//! spa-server/src/
//! ├── core/          # Configuration, shared state, HTTP server
//! ├── auth/          # JWT bearer auth
//! ├── api/           # HTTP routes and handlers
//! ├── billing/       # Invoice derivation (pricing + materialization)
//! ├── db/            # Models and repositories on embedded SurrealDB
//! └── utils/         # Errors, logging, id tokens
//! ```

pub mod api;
pub mod auth;
pub mod billing;
pub mod core;
pub mod db;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_app, build_router};
pub use utils::logger::{init_logger, init_logger_with_file};
pub use utils::{AppError, AppResult};

/// Load .env and set up logging before anything else runs
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref())?;

    Ok(())
}
