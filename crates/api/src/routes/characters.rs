use axum::routing::get;
use axum::Router;

use crate::handlers::my_character;
use crate::state::AppState;

/// Routes mounted at `/characters` (user character assignments by id).
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(my_character::get_by_id))
}
