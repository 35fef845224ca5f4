//! Routes for the read-only story catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::{story, substory};
use crate::state::AppState;

/// Routes mounted at `/stories`.
///
/// ```text
/// GET /                          -> list_stories
/// GET /{story_id}                -> get_story
/// GET /{story_id}/substories     -> list_by_story
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(story::list_stories))
        .route("/{story_id}", get(story::get_story))
        .route("/{story_id}/substories", get(substory::list_by_story))
}
