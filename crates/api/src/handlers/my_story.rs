//! Handlers for the `/mystories` resource.
//!
//! A MyStory is created when a user picks a story, finalized once with the
//! ordered list of substories they chose, and deleted explicitly. Only the
//! owning user may read, finalize, or delete it.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use taleweave_core::chain::{plan_chain, unknown_substories, verify_chain, ChainNode};
use taleweave_core::error::{ensure_owner, CoreError};
use taleweave_core::images;
use taleweave_core::types::DbId;
use taleweave_db::models::my_story::{CreateMyStory, FinalizeMyStory, MyStory};
use taleweave_db::repositories::{MyStoryRepo, MySubstoryRepo, StoryRepo, SubstoryRepo};
use taleweave_db::DbPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::middleware::auth::AuthUser;
use crate::query::MyStoryListParams;
use crate::state::AppState;

/// Load a MyStory and check that `user_id` owns it.
///
/// 404 if it does not exist, 403 if it belongs to someone else.
pub(crate) async fn load_owned(pool: &DbPool, id: DbId, user_id: DbId) -> AppResult<MyStory> {
    let my_story = MyStoryRepo::find_by_id(pool, id)
        .await?
        .ok_or(CoreError::not_found("MyStory", id))?;
    ensure_owner("MyStory", id, my_story.user_id, user_id)?;
    Ok(my_story)
}

/// GET /api/v1/mystories[?story_id=]
pub async fn list(
    user: AuthUser,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<MyStoryListParams>,
) -> AppResult<Json<Vec<MyStory>>> {
    let my_stories = MyStoryRepo::list_by_user(&state.pool, user.user_id, params.story_id).await?;
    Ok(Json(my_stories))
}

/// POST /api/v1/mystories
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateMyStory>,
) -> AppResult<(StatusCode, Json<MyStory>)> {
    input.validate()?;

    if !StoryRepo::exists(&state.pool, input.story_id).await? {
        return Err(CoreError::not_found("Story", input.story_id).into());
    }

    let my_story = MyStoryRepo::create(&state.pool, user.user_id, &input).await?;

    tracing::info!(
        my_story_id = my_story.id,
        story_id = my_story.story_id,
        user_id = user.user_id,
        "MyStory created",
    );

    Ok((StatusCode::CREATED, Json(my_story)))
}

/// GET /api/v1/mystories/{id}
pub async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<MyStory>> {
    let my_story = load_owned(&state.pool, id, user.user_id).await?;
    Ok(Json(my_story))
}

/// DELETE /api/v1/mystories/{id}
///
/// Removes the MyStory together with its chain and character assignments.
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<StatusCode> {
    load_owned(&state.pool, id, user.user_id).await?;

    if !MyStoryRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found("MyStory", id).into());
    }

    tracing::info!(my_story_id = id, user_id = user.user_id, "MyStory deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/mystories/{id}
///
/// Final submission. Builds the MySubstory chain from `substory_list`, points
/// the MyStory at its head, and copies the user's staged images into the
/// MyStory's permanent directory. The database writes commit only after the
/// copy succeeds.
pub async fn finalize(
    user: AuthUser,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
    JsonBody(input): JsonBody<FinalizeMyStory>,
) -> AppResult<StatusCode> {
    let my_story = load_owned(&state.pool, id, user.user_id).await?;

    let substory_ids = input
        .substory_list
        .as_deref()
        .ok_or_else(|| CoreError::Validation("substory_list is required".to_string()))?;
    let links = plan_chain(substory_ids)?;

    if my_story.is_finalized() {
        return Err(already_finalized(id));
    }

    let known =
        SubstoryRepo::filter_ids_in_story(&state.pool, my_story.story_id, substory_ids).await?;
    let unknown = unknown_substories(substory_ids, &known);
    if !unknown.is_empty() {
        return Err(CoreError::Validation(format!(
            "Substories {unknown:?} are not part of story {}",
            my_story.story_id
        ))
        .into());
    }

    let mut tx = state.pool.begin().await?;

    // A concurrent finalization may have won since the first read.
    let locked = MyStoryRepo::lock_for_update(&mut *tx, id)
        .await?
        .ok_or(CoreError::not_found("MyStory", id))?;
    if locked.is_finalized() {
        return Err(already_finalized(id));
    }

    let nodes = MySubstoryRepo::insert_chain(&mut *tx, id, &links).await?;
    verify_chain(&nodes.iter().map(ChainNode::from).collect::<Vec<_>>())?;
    let head = nodes
        .first()
        .map(|node| node.id)
        .ok_or_else(|| AppError::InternalError("Chain insert returned no nodes".to_string()))?;
    MyStoryRepo::attach_chain(&mut *tx, id, head, input.is_finished(), input.is_default)
        .await?;

    // Dropping `tx` on an error here rolls the chain back.
    let (image_dir, files) =
        images::promote_conversion_dir(&state.images, user.user_id, id).await?;

    if let Err(e) = tx.commit().await {
        images::remove_dir_quietly(&image_dir).await;
        return Err(e.into());
    }

    tracing::info!(
        my_story_id = id,
        user_id = user.user_id,
        chain_length = nodes.len(),
        images_copied = files,
        finished = input.is_finished(),
        "MyStory finalized",
    );

    Ok(StatusCode::CREATED)
}

fn already_finalized(id: DbId) -> AppError {
    CoreError::Conflict(format!("MyStory {id} has already been finalized")).into()
}
