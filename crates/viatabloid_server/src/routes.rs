//! HTTP routes for the story resource.
//!
//! | Verb | Path | Success | Failure |
//! |---|---|---|---|
//! | GET | `/api/stories` | 200 | 500 |
//! | GET | `/api/stories/:id` | 200 | 400, 404, 500 |
//! | POST | `/api/stories` | 201 | 422, 500 |
//! | PUT | `/api/stories/:id` | 200 | 400, 404, 422, 500 |
//! | DELETE | `/api/stories/:id` | 204 | 400, 500 |
//!
//! 400 is a malformed `:id` and 422 a body missing a story field; both are
//! rejected by the extractors before the service runs. Request bodies have
//! no size cap since story content is unbounded.

use axum::{
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use log::{debug, error};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use viatabloid_core::{ReplyStatus, Story, StoryId, StoryReply};

use crate::state::AppState;

pub const STORIES_PATH: &str = "/api/stories";
pub const STORY_PATH: &str = "/api/stories/:id";

/// Builds the application router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(STORIES_PATH, get(list_stories).post(create_story))
        .route(
            STORY_PATH,
            get(get_story).put(update_story).delete(delete_story),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthRes {
    ok: bool,
    message: &'static str,
    version: &'static str,
}

/// Renders a service reply: JSON body on success, bare status otherwise.
struct ApiReply<T> {
    operation: &'static str,
    reply: StoryReply<T>,
}

impl<T: Serialize> IntoResponse for ApiReply<T> {
    fn into_response(self) -> Response {
        let StoryReply { status, body } = self.reply;
        let code =
            StatusCode::from_u16(status.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match status {
            ReplyStatus::InternalError => {
                error!(
                    "event=story_{} module=http status=error http_status={}",
                    self.operation,
                    code.as_u16()
                );
            }
            _ => debug!(
                "event=story_{} module=http status=ok http_status={}",
                self.operation,
                code.as_u16()
            ),
        }

        match body {
            Some(body) if status.is_success() => (code, Json(body)).into_response(),
            _ => code.into_response(),
        }
    }
}

async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        ok: viatabloid_core::ping() == "pong",
        message: "Viatabloid story API is alive",
        version: viatabloid_core::core_version(),
    })
}

async fn list_stories(State(state): State<AppState>) -> impl IntoResponse {
    ApiReply {
        operation: "list",
        reply: state.with_service(move |service| service.list()).await,
    }
}

async fn get_story(
    State(state): State<AppState>,
    Path(id): Path<StoryId>,
) -> impl IntoResponse {
    ApiReply {
        operation: "get",
        reply: state.with_service(move |service| service.get(id)).await,
    }
}

async fn create_story(
    State(state): State<AppState>,
    Json(draft): Json<Story>,
) -> impl IntoResponse {
    ApiReply {
        operation: "create",
        reply: state.with_service(move |service| service.create(&draft)).await,
    }
}

async fn update_story(
    State(state): State<AppState>,
    Path(id): Path<StoryId>,
    Json(draft): Json<Story>,
) -> impl IntoResponse {
    ApiReply {
        operation: "update",
        reply: state.with_service(move |service| service.update(id, &draft)).await,
    }
}

async fn delete_story(
    State(state): State<AppState>,
    Path(id): Path<StoryId>,
) -> impl IntoResponse {
    ApiReply {
        operation: "delete",
        reply: state.with_service(move |service| service.delete(id)).await,
    }
}
