//! # Viatabloid server
//!
//! HTTP surface for the story backend.
//!
//! Handles:
//! - JSON routes under `/api/stories` with axum
//! - environment configuration
//! - sharing one SQLite connection across requests
//!
//! Business rules live in `viatabloid_core`.

#![warn(rust_2018_idioms)]

pub mod config;
pub mod routes;
pub mod state;

pub use config::{ConfigError, DbLocation, ServerConfig};
pub use routes::router;
pub use state::AppState;
