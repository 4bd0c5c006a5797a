//! Story repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide find/save/delete over the `stories` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `save` assigns a fresh v4 id to unsaved stories and never changes an
//!   existing id.
//! - Read paths reject malformed rows instead of masking them.

use crate::db::DbError;
use crate::model::story::{Story, StoryId, StoryValidationError};
use log::error;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const STORY_SELECT_SQL: &str = "SELECT id, title, content, department FROM stories";

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure raised by a story repository.
#[derive(Debug)]
pub enum RepoError {
    Validation(StoryValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted story data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<StoryValidationError> for RepoError {
    fn from(value: StoryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value style store of stories keyed by `StoryId`.
pub trait StoryRepository {
    /// Returns every stored story in storage-defined order.
    fn find_all(&self) -> RepoResult<Vec<Story>>;
    fn find_by_id(&self, id: StoryId) -> RepoResult<Option<Story>>;
    /// Inserts an unsaved story under a new id, or overwrites the row that
    /// carries `story.id`. Returns the stored record.
    fn save(&self, story: &Story) -> RepoResult<Story>;
    /// Removes the row for `id`. A missing row is not an error.
    fn delete_by_id(&self, id: StoryId) -> RepoResult<()>;
}

impl<R: StoryRepository + ?Sized> StoryRepository for &R {
    fn find_all(&self) -> RepoResult<Vec<Story>> {
        (**self).find_all()
    }

    fn find_by_id(&self, id: StoryId) -> RepoResult<Option<Story>> {
        (**self).find_by_id(id)
    }

    fn save(&self, story: &Story) -> RepoResult<Story> {
        (**self).save(story)
    }

    fn delete_by_id(&self, id: StoryId) -> RepoResult<()> {
        (**self).delete_by_id(id)
    }
}

/// SQLite-backed story repository borrowing an open connection.
pub struct SqliteStoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStoryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StoryRepository for SqliteStoryRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Story>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STORY_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut stories = Vec::new();

        while let Some(row) = rows.next()? {
            stories.push(parse_story_row(row)?);
        }

        Ok(stories)
    }

    fn find_by_id(&self, id: StoryId) -> RepoResult<Option<Story>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STORY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_story_row(row)?));
        }

        Ok(None)
    }

    fn save(&self, story: &Story) -> RepoResult<Story> {
        story.validate()?;

        let mut stored = story.clone();
        let id = *stored.id.get_or_insert_with(Uuid::new_v4);

        let result = self.conn.execute(
            "INSERT INTO stories (id, title, content, department)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                content = excluded.content,
                department = excluded.department;",
            params![
                id.to_string(),
                stored.title.as_str(),
                stored.content.as_str(),
                stored.department.as_str(),
            ],
        );
        if let Err(err) = result {
            error!("event=story_save module=repo status=error story_id={id} error={err}");
            return Err(err.into());
        }

        Ok(stored)
    }

    fn delete_by_id(&self, id: StoryId) -> RepoResult<()> {
        if let Err(err) = self
            .conn
            .execute("DELETE FROM stories WHERE id = ?1;", [id.to_string()])
        {
            error!("event=story_delete module=repo status=error story_id={id} error={err}");
            return Err(err.into());
        }
        Ok(())
    }
}

fn parse_story_row(row: &Row<'_>) -> RepoResult<Story> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in stories.id"))
    })?;

    let story = Story::with_id(
        id,
        row.get::<_, String>("title")?,
        row.get::<_, String>("content")?,
        row.get::<_, String>("department")?,
    )?;
    Ok(story)
}
