//! Handler for branch (decision point) detail.

use axum::extract::State;
use axum::Json;
use taleweave_core::error::CoreError;
use taleweave_core::types::DbId;
use taleweave_db::models::branch::BranchDetail;
use taleweave_db::repositories::{BranchRepo, SubstoryRepo};

use crate::error::AppResult;
use crate::extract::PathParam;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/branches/{branch_id}
pub async fn get_branch(
    _user: AuthUser,
    State(state): State<AppState>,
    PathParam(branch_id): PathParam<DbId>,
) -> AppResult<Json<BranchDetail>> {
    let branch = BranchRepo::find_by_id(&state.pool, branch_id)
        .await?
        .ok_or(CoreError::not_found("Branch", branch_id))?;
    let substories = SubstoryRepo::list_by_branch(&state.pool, branch_id).await?;

    Ok(Json(BranchDetail { branch, substories }))
}
