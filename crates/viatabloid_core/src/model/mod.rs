//! Domain model for the story backend.
//!
//! # Responsibility
//! - Define canonical data structures used by repository and service layers.
//!
//! # Invariants
//! - Every persisted story is identified by a stable `StoryId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod story;
