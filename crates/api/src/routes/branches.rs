use axum::routing::get;
use axum::Router;

use crate::handlers::branch;
use crate::state::AppState;

/// Routes mounted at `/branches`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{branch_id}", get(branch::get_branch))
}
