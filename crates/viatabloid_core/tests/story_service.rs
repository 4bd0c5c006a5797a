use std::cell::RefCell;
use uuid::Uuid;
use viatabloid_core::db::open_db_in_memory;
use viatabloid_core::{
    RepoError, RepoResult, ReplyStatus, SqliteStoryRepository, Story, StoryId, StoryRepository,
    StoryService,
};

/// Repository fake that records every call and can be told to fail.
#[derive(Default)]
struct RecordingRepository {
    stories: RefCell<Vec<Story>>,
    fail_find: bool,
    fail_save: bool,
    fail_delete: bool,
    find_by_id_calls: RefCell<Vec<StoryId>>,
    saved: RefCell<Vec<Story>>,
    deleted: RefCell<Vec<StoryId>>,
}

impl RecordingRepository {
    fn with_stories(stories: Vec<Story>) -> Self {
        Self {
            stories: RefCell::new(stories),
            ..Self::default()
        }
    }

    fn failing_lookups(stories: Vec<Story>) -> Self {
        Self {
            fail_find: true,
            ..Self::with_stories(stories)
        }
    }

    fn failing_saves(stories: Vec<Story>) -> Self {
        Self {
            fail_save: true,
            ..Self::with_stories(stories)
        }
    }

    fn failing_deletes() -> Self {
        Self {
            fail_delete: true,
            ..Self::default()
        }
    }
}

fn storage_error() -> RepoError {
    RepoError::InvalidData("database error".to_string())
}

impl StoryRepository for RecordingRepository {
    fn find_all(&self) -> RepoResult<Vec<Story>> {
        Ok(self.stories.borrow().clone())
    }

    fn find_by_id(&self, id: StoryId) -> RepoResult<Option<Story>> {
        self.find_by_id_calls.borrow_mut().push(id);
        if self.fail_find {
            return Err(storage_error());
        }
        Ok(self
            .stories
            .borrow()
            .iter()
            .find(|story| story.id == Some(id))
            .cloned())
    }

    fn save(&self, story: &Story) -> RepoResult<Story> {
        self.saved.borrow_mut().push(story.clone());
        if self.fail_save {
            return Err(storage_error());
        }
        let mut stored = story.clone();
        stored.id.get_or_insert_with(Uuid::new_v4);
        Ok(stored)
    }

    fn delete_by_id(&self, id: StoryId) -> RepoResult<()> {
        self.deleted.borrow_mut().push(id);
        if self.fail_delete {
            return Err(storage_error());
        }
        Ok(())
    }
}

fn story(title: &str, department: &str) -> Story {
    Story::with_id(Uuid::new_v4(), title, format!("{title} content"), department).unwrap()
}

#[test]
fn list_returns_all_stories() {
    let first = story("Title One", "Department A");
    let second = story("Title Two", "Department B");
    let repo = RecordingRepository::with_stories(vec![first.clone(), second.clone()]);
    let service = StoryService::new(&repo);

    let reply = service.list();

    assert_eq!(reply.status, ReplyStatus::Ok);
    let body = reply.body.unwrap();
    assert_eq!(body.len(), 2);
    assert!(body.contains(&first));
    assert!(body.contains(&second));
}

#[test]
fn list_of_empty_store_is_ok_and_empty() {
    let repo = RecordingRepository::default();
    let reply = StoryService::new(&repo).list();

    assert_eq!(reply.status, ReplyStatus::Ok);
    assert_eq!(reply.body, Some(Vec::new()));
}

#[test]
fn get_returns_story_when_found() {
    let existing = story("Title One", "Department A");
    let id = existing.id.unwrap();
    let repo = RecordingRepository::with_stories(vec![existing.clone()]);

    let reply = StoryService::new(&repo).get(id);

    assert_eq!(reply.status, ReplyStatus::Ok);
    assert_eq!(reply.body, Some(existing));
    assert_eq!(*repo.find_by_id_calls.borrow(), vec![id]);
}

#[test]
fn get_returns_not_found_without_body() {
    let repo = RecordingRepository::default();
    let missing = Uuid::new_v4();

    let reply = StoryService::new(&repo).get(missing);

    assert_eq!(reply.status, ReplyStatus::NotFound);
    assert!(reply.body.is_none());
    assert_eq!(*repo.find_by_id_calls.borrow(), vec![missing]);
}

#[test]
fn create_returns_created_with_generated_id() {
    let repo = RecordingRepository::default();
    let draft = Story::new("New Title", "New Content", "New Dept");

    let reply = StoryService::new(&repo).create(&draft);

    assert_eq!(reply.status, ReplyStatus::Created);
    let saved = reply.body.unwrap();
    assert!(saved.id.is_some());
    assert_eq!(saved.title, "New Title");
    assert_eq!(saved.content, "New Content");
    assert_eq!(saved.department, "New Dept");
    assert_eq!(repo.saved.borrow().len(), 1);
}

#[test]
fn create_ignores_client_supplied_id() {
    let repo = RecordingRepository::default();
    let spoofed = Uuid::new_v4();
    let mut draft = Story::new("t", "c", "d");
    draft.id = Some(spoofed);

    let reply = StoryService::new(&repo).create(&draft);

    assert_eq!(repo.saved.borrow()[0].id, None);
    assert_ne!(reply.body.unwrap().id, Some(spoofed));
}

#[test]
fn update_overwrites_fields_and_keeps_id() {
    let existing = story("Title One", "Department A");
    let id = existing.id.unwrap();
    let repo = RecordingRepository::with_stories(vec![existing]);
    let mut draft = Story::new("Updated Title", "Updated Content", "Updated Dept");
    draft.id = Some(Uuid::new_v4());

    let reply = StoryService::new(&repo).update(id, &draft);

    assert_eq!(reply.status, ReplyStatus::Ok);
    let updated = reply.body.unwrap();
    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.title, "Updated Title");
    assert_eq!(updated.content, "Updated Content");
    assert_eq!(updated.department, "Updated Dept");

    let saved = repo.saved.borrow();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, Some(id));
}

#[test]
fn update_of_missing_story_is_not_found_and_never_saves() {
    let repo = RecordingRepository::default();
    let missing = Uuid::new_v4();

    let reply = StoryService::new(&repo).update(missing, &Story::new("Title", "Content", "Dept"));

    assert_eq!(reply.status, ReplyStatus::NotFound);
    assert!(reply.body.is_none());
    assert_eq!(*repo.find_by_id_calls.borrow(), vec![missing]);
    assert!(repo.saved.borrow().is_empty());
}

#[test]
fn delete_returns_no_content() {
    let repo = RecordingRepository::default();
    let id = Uuid::new_v4();

    let reply = StoryService::new(&repo).delete(id);

    assert_eq!(reply.status, ReplyStatus::NoContent);
    assert!(reply.body.is_none());
    assert_eq!(*repo.deleted.borrow(), vec![id]);
    assert!(repo.find_by_id_calls.borrow().is_empty());
}

#[test]
fn delete_failure_returns_internal_error() {
    let repo = RecordingRepository::failing_deletes();
    let id = Uuid::new_v4();

    let reply = StoryService::new(&repo).delete(id);

    assert_eq!(reply.status, ReplyStatus::InternalError);
    assert!(reply.body.is_none());
    assert_eq!(*repo.deleted.borrow(), vec![id]);
}

#[test]
fn create_save_failure_returns_internal_error() {
    let repo = RecordingRepository::failing_saves(Vec::new());

    let reply = StoryService::new(&repo).create(&Story::new("t", "c", "d"));

    assert_eq!(reply.status, ReplyStatus::InternalError);
    assert!(reply.body.is_none());
    assert_eq!(repo.saved.borrow().len(), 1);
}

#[test]
fn update_save_failure_returns_internal_error() {
    let existing = story("Title One", "Department A");
    let id = existing.id.unwrap();
    let repo = RecordingRepository::failing_saves(vec![existing]);

    let reply = StoryService::new(&repo).update(id, &Story::new("t", "c", "d"));

    assert_eq!(reply.status, ReplyStatus::InternalError);
    assert!(reply.body.is_none());
    assert_eq!(repo.saved.borrow().len(), 1);
}

#[test]
fn update_lookup_failure_returns_internal_error_and_never_saves() {
    let existing = story("Title One", "Department A");
    let id = existing.id.unwrap();
    let repo = RecordingRepository::failing_lookups(vec![existing]);

    let reply = StoryService::new(&repo).update(id, &Story::new("t", "c", "d"));

    assert_eq!(reply.status, ReplyStatus::InternalError);
    assert!(reply.body.is_none());
    assert_eq!(*repo.find_by_id_calls.borrow(), vec![id]);
    assert!(repo.saved.borrow().is_empty());
}

#[test]
fn full_lifecycle_against_sqlite() {
    let conn = open_db_in_memory().unwrap();
    let service = StoryService::new(SqliteStoryRepository::new(&conn));

    let created = service
        .create(&Story::new("Launch", "We shipped.", "Engineering"))
        .body
        .unwrap();
    let id = created.id.unwrap();

    let updated = service.update(id, &Story::new("Launch v2", "We shipped again.", "Product"));
    assert_eq!(updated.status, ReplyStatus::Ok);

    let fetched = service.get(id).body.unwrap();
    assert_eq!(fetched.title, "Launch v2");
    assert_eq!(fetched.department, "Product");
    assert_eq!(service.list().body.unwrap().len(), 1);

    assert_eq!(service.delete(id).status, ReplyStatus::NoContent);
    assert_eq!(service.get(id).status, ReplyStatus::NotFound);
    assert_eq!(service.delete(id).status, ReplyStatus::NoContent);
}

#[test]
fn storage_failures_map_to_internal_error() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE stories;").unwrap();
    let service = StoryService::new(SqliteStoryRepository::new(&conn));

    assert_eq!(service.list().status, ReplyStatus::InternalError);
    assert_eq!(service.get(Uuid::new_v4()).status, ReplyStatus::InternalError);
    let draft = Story::new("t", "c", "d");
    let created = service.create(&draft);
    assert_eq!(created.status, ReplyStatus::InternalError);
    assert!(created.body.is_none());
    let updated = service.update(Uuid::new_v4(), &draft);
    assert_eq!(updated.status, ReplyStatus::InternalError);
    assert!(updated.body.is_none());
    assert_eq!(service.delete(Uuid::new_v4()).status, ReplyStatus::InternalError);
}
