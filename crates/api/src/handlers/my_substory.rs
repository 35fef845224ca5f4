//! Handlers for the chosen substory chain of a MyStory.

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use taleweave_core::error::CoreError;
use taleweave_core::types::DbId;
use taleweave_db::models::my_substory::{MySubstoryDetail, MySubstoryEntry};
use taleweave_db::models::substory::SubstoryWithScripts;
use taleweave_db::repositories::{MySubstoryRepo, ScriptRepo, SubstoryRepo};

use crate::error::{AppError, AppResult};
use crate::extract::PathParam;
use crate::handlers::my_story::load_owned;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/mystories/{id}/mysubstories
///
/// The chain in link order; empty until the MyStory is finalized.
pub async fn list(
    user: AuthUser,
    State(state): State<AppState>,
    PathParam(my_story_id): PathParam<DbId>,
) -> AppResult<Json<Vec<MySubstoryEntry>>> {
    let my_story = load_owned(&state.pool, my_story_id, user.user_id).await?;
    let Some(head_id) = my_story.first_substory_id else {
        return Ok(Json(Vec::new()));
    };

    let chain = MySubstoryRepo::list_chain(&state.pool, head_id).await?;
    let ids: Vec<DbId> = chain.iter().map(|n| n.substory_id).collect();
    let substories: HashMap<DbId, _> = SubstoryRepo::list_by_ids(&state.pool, &ids)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    let entries = chain
        .into_iter()
        .map(|node| {
            let substory = substories.get(&node.substory_id).cloned().ok_or_else(|| {
                AppError::InternalError(format!(
                    "Substory {} referenced by chain node {} is missing",
                    node.substory_id, node.id
                ))
            })?;
            Ok(MySubstoryEntry { node, substory })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(entries))
}

/// GET /api/v1/mystories/{id}/mysubstories/{my_substory_id}
///
/// 404 when the node does not exist or belongs to another MyStory.
pub async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    PathParam((my_story_id, my_substory_id)): PathParam<(DbId, DbId)>,
) -> AppResult<Json<MySubstoryDetail>> {
    load_owned(&state.pool, my_story_id, user.user_id).await?;

    let node = MySubstoryRepo::find_by_id(&state.pool, my_substory_id)
        .await?
        .filter(|n| n.my_story_id == my_story_id)
        .ok_or(CoreError::not_found("MySubstory", my_substory_id))?;

    let substory = SubstoryRepo::find_by_id(&state.pool, node.substory_id)
        .await?
        .ok_or(CoreError::not_found("Substory", node.substory_id))?;
    let scripts = ScriptRepo::list_by_substory(&state.pool, substory.id).await?;

    Ok(Json(MySubstoryDetail {
        node,
        substory: SubstoryWithScripts { substory, scripts },
    }))
}
