//! Shared application state for HTTP handlers.

use log::error;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use viatabloid_core::{ReplyStatus, SqliteStoryRepository, StoryReply, StoryService};

/// Owns the single SQLite connection shared by all requests.
#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs one service call with the connection locked.
    ///
    /// SQLite I/O happens on the blocking pool so async workers keep serving
    /// other requests. A poisoned lock or a panicked task yields an
    /// `InternalError` reply.
    pub async fn with_service<T>(
        &self,
        op: impl FnOnce(&StoryService<SqliteStoryRepository<'_>>) -> StoryReply<T> + Send + 'static,
    ) -> StoryReply<T>
    where
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let task = tokio::task::spawn_blocking(move || {
            let conn = match conn.lock() {
                Ok(conn) => conn,
                Err(_) => {
                    error!("event=db_lock module=http status=error error_code=lock_poisoned");
                    return internal_error();
                }
            };

            let service = StoryService::new(SqliteStoryRepository::new(&conn));
            op(&service)
        });

        match task.await {
            Ok(reply) => reply,
            Err(err) => {
                error!("event=db_task module=http status=error error_code=task_failed error={err}");
                internal_error()
            }
        }
    }
}

fn internal_error<T>() -> StoryReply<T> {
    StoryReply {
        status: ReplyStatus::InternalError,
        body: None,
    }
}
