//! Story use-case service.
//!
//! # Responsibility
//! - Map the five story verbs onto repository calls.
//! - Translate repository outcomes into reply statuses so transports only
//!   have to render them.
//!
//! # Invariants
//! - Not-found is a reply status, never an error.
//! - `update` never calls `save` for a missing story, and never changes `id`.
//! - `delete` does not check existence first; only a repository failure
//!   changes its outcome.

use crate::model::story::{Story, StoryId};
use crate::repo::story_repo::{RepoResult, StoryRepository};

/// Outcome category of a service call, aligned with HTTP semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyStatus {
    Ok,
    Created,
    NoContent,
    NotFound,
    InternalError,
}

impl ReplyStatus {
    /// Numeric HTTP status code for this outcome.
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::NoContent => 204,
            Self::NotFound => 404,
            Self::InternalError => 500,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Ok | Self::Created | Self::NoContent)
    }
}

/// Status plus optional body returned by every service operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryReply<T> {
    pub status: ReplyStatus,
    pub body: Option<T>,
}

impl<T> StoryReply<T> {
    fn with_body(status: ReplyStatus, body: T) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    fn empty(status: ReplyStatus) -> Self {
        Self { status, body: None }
    }

    fn from_repo(result: RepoResult<T>, status: ReplyStatus) -> Self {
        match result {
            Ok(body) => Self::with_body(status, body),
            Err(_) => Self::empty(ReplyStatus::InternalError),
        }
    }
}

/// Use-case service for story CRUD.
pub struct StoryService<R: StoryRepository> {
    repo: R,
}

impl<R: StoryRepository> StoryService<R> {
    /// Creates a service over the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all stored stories.
    pub fn list(&self) -> StoryReply<Vec<Story>> {
        StoryReply::from_repo(self.repo.find_all(), ReplyStatus::Ok)
    }

    /// Gets one story; `NotFound` with no body when absent.
    pub fn get(&self, id: StoryId) -> StoryReply<Story> {
        match self.repo.find_by_id(id) {
            Ok(Some(story)) => StoryReply::with_body(ReplyStatus::Ok, story),
            Ok(None) => StoryReply::empty(ReplyStatus::NotFound),
            Err(_) => StoryReply::empty(ReplyStatus::InternalError),
        }
    }

    /// Persists a draft under a freshly assigned id.
    ///
    /// Any id carried by the draft is discarded before saving.
    pub fn create(&self, draft: &Story) -> StoryReply<Story> {
        let unsaved = Story {
            id: None,
            ..draft.clone()
        };
        StoryReply::from_repo(self.repo.save(&unsaved), ReplyStatus::Created)
    }

    /// Overwrites title, content and department of an existing story.
    pub fn update(&self, id: StoryId, draft: &Story) -> StoryReply<Story> {
        let mut existing = match self.repo.find_by_id(id) {
            Ok(Some(story)) => story,
            Ok(None) => return StoryReply::empty(ReplyStatus::NotFound),
            Err(_) => return StoryReply::empty(ReplyStatus::InternalError),
        };

        existing.apply_draft(draft);
        StoryReply::from_repo(self.repo.save(&existing), ReplyStatus::Ok)
    }

    /// Deletes by id; `InternalError` if the repository fails, else `NoContent`.
    pub fn delete(&self, id: StoryId) -> StoryReply<()> {
        match self.repo.delete_by_id(id) {
            Ok(()) => StoryReply::empty(ReplyStatus::NoContent),
            Err(_) => StoryReply::empty(ReplyStatus::InternalError),
        }
    }
}
