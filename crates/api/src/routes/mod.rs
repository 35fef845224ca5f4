pub mod branches;
pub mod characters;
pub mod health;
pub mod my_stories;
pub mod stories;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /stories                                        list (public)
/// /stories/{story_id}                             detail (public)
/// /stories/{story_id}/substories                  substories with scripts
///
/// /branches/{branch_id}                           branch with options
///
/// /mystories                                      list, create
/// /mystories/{id}                                 get, delete, finalize (POST)
/// /mystories/{id}/characters                      list, create
/// /mystories/{id}/substories/{substory_id}        substory with character overlay
/// /mystories/{id}/mysubstories                    chosen chain in order
/// /mystories/{id}/mysubstories/{my_substory_id}   chain node detail
///
/// /characters/{id}                                MyCharacter detail
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/stories", stories::router())
        .nest("/branches", branches::router())
        .nest("/mystories", my_stories::router())
        .nest("/characters", characters::router())
}
