//! Core Module
//!
//! Configuration, shared state and the HTTP server.

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::{Server, build_app, build_router};
pub use state::ServerState;
