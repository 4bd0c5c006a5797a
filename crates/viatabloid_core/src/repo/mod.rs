//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the persistence contract the story service depends on.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Writes enforce `Story::validate()` before SQL mutations.

pub mod story_repo;
