//! Routes for per-user playthroughs and their sub-resources.

use axum::routing::get;
use axum::Router;

use crate::handlers::{my_character, my_story, my_substory, substory};
use crate::state::AppState;

/// Routes mounted at `/mystories`.
///
/// ```text
/// GET    /                                        -> list
/// POST   /                                        -> create
/// GET    /{id}                                    -> get_by_id
/// DELETE /{id}                                    -> delete
/// POST   /{id}                                    -> finalize
///
/// GET    /{id}/characters                         -> my_character::list
/// POST   /{id}/characters                         -> my_character::create
///
/// GET    /{id}/substories/{substory_id}           -> substory::get_with_overlay
///
/// GET    /{id}/mysubstories                       -> my_substory::list
/// GET    /{id}/mysubstories/{my_substory_id}      -> my_substory::get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(my_story::list).post(my_story::create))
        .route(
            "/{id}",
            get(my_story::get_by_id)
                .delete(my_story::delete)
                .post(my_story::finalize),
        )
        .route(
            "/{id}/characters",
            get(my_character::list).post(my_character::create),
        )
        .route(
            "/{id}/substories/{substory_id}",
            get(substory::get_with_overlay),
        )
        .route("/{id}/mysubstories", get(my_substory::list))
        .route(
            "/{id}/mysubstories/{my_substory_id}",
            get(my_substory::get_by_id),
        )
}
