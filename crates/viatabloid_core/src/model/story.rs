//! Story domain model.
//!
//! # Responsibility
//! - Define the single persisted record served by the story backend.
//! - Provide the identity-only equality rule used across layers.
//!
//! # Invariants
//! - `id` is `None` until persistence assigns one, and never changes after.
//! - Equality and hashing look at `id` only. A story without `id` equals
//!   nothing but itself.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Stable identifier assigned by the persistence layer on first save.
pub type StoryId = Uuid;

/// Validation failures for story identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryValidationError {
    /// The nil UUID is never a valid story identity.
    NilId,
}

impl Display for StoryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "story id must not be the nil uuid"),
        }
    }
}

impl Error for StoryValidationError {}

/// A titled piece of content tagged with the department that owns it.
///
/// Also used as the client draft for create/update, in which case `id` is
/// not trusted and is ignored by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    /// Serialized as a hyphenated UUID string, or `null` before first save.
    #[serde(default)]
    pub id: Option<StoryId>,
    pub title: String,
    /// Unbounded text body.
    pub content: String,
    pub department: String,
}

impl Story {
    /// Creates an unsaved draft with no identity.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
            department: department.into(),
        }
    }

    /// Creates a story with a caller-provided identity.
    ///
    /// Used by persistence when materializing rows and by tests.
    ///
    /// # Errors
    /// - Returns `StoryValidationError::NilId` for `Uuid::nil()`.
    pub fn with_id(
        id: StoryId,
        title: impl Into<String>,
        content: impl Into<String>,
        department: impl Into<String>,
    ) -> Result<Self, StoryValidationError> {
        let story = Self {
            id: Some(id),
            ..Self::new(title, content, department)
        };
        story.validate()?;
        Ok(story)
    }

    /// Checks identity invariants before the story is written or returned.
    pub fn validate(&self) -> Result<(), StoryValidationError> {
        match self.id {
            Some(id) if id.is_nil() => Err(StoryValidationError::NilId),
            _ => Ok(()),
        }
    }

    /// Returns whether persistence has assigned an identity.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Overwrites the mutable fields from `draft`. `id` is left untouched.
    pub fn apply_draft(&mut self, draft: &Story) {
        self.title.clone_from(&draft.title);
        self.content.clone_from(&draft.content);
        self.department.clone_from(&draft.department);
    }
}

impl PartialEq for Story {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(left), Some(right)) => left == right,
            _ => std::ptr::eq(self, other),
        }
    }
}

impl Eq for Story {}

impl Hash for Story {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for Story {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = self
            .id
            .map_or_else(|| "null".to_string(), |id| id.to_string());
        write!(
            f,
            "Story(id={id}, title={}, content={}, department={})",
            self.title, self.content, self.department
        )
    }
}
