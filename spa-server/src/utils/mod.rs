//! Utility module - shared helpers and types
//!
//! - [`AppError`] / [`AppResult`] - application error type and result alias
//! - [`generate_token`] - prefixed business token generation
//! - logger setup

pub mod error;
pub mod id;
pub mod logger;
pub mod result;

pub use error::{AppError, AppResponse};
pub use error::{ok, ok_with_message};
pub use id::generate_token;
pub use result::AppResult;
