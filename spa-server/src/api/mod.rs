//! API Module
//!
//! One submodule per resource, each exposing a `router()`.

pub mod appointments;
pub mod billing;
pub mod health;
pub mod packages;
pub mod rooms;
pub mod services;
pub mod therapists;
