//! Core domain logic for the Viatabloid story backend.
//! Transports (HTTP) stay thin and call into `StoryService`.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::story::{Story, StoryId, StoryValidationError};
pub use repo::story_repo::{RepoError, RepoResult, SqliteStoryRepository, StoryRepository};
pub use service::story_service::{ReplyStatus, StoryReply, StoryService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
