//! Handlers for character assignments within a MyStory.
//!
//! `/mystories/{id}/characters` lists and creates; `/characters/{id}` reads
//! a single assignment. All access is limited to the MyStory's owner.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use taleweave_core::error::{ensure_owner, CoreError};
use taleweave_core::types::DbId;
use taleweave_db::models::my_character::{CreateMyCharacter, MyCharacterDetail};
use taleweave_db::repositories::{CharacterRepo, MyCharacterRepo, MyStoryRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParam};
use crate::handlers::my_story::load_owned;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/mystories/{id}/characters
pub async fn list(
    user: AuthUser,
    State(state): State<AppState>,
    PathParam(my_story_id): PathParam<DbId>,
) -> AppResult<Json<Vec<MyCharacterDetail>>> {
    let my_story = load_owned(&state.pool, my_story_id, user.user_id).await?;

    let assignments = MyCharacterRepo::list_by_my_story(&state.pool, my_story_id).await?;
    let cast: HashMap<DbId, _> = CharacterRepo::list_by_story(&state.pool, my_story.story_id)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let details = assignments
        .into_iter()
        .map(|my_character| {
            let character = cast
                .get(&my_character.character_id)
                .cloned()
                .ok_or_else(|| {
                    AppError::InternalError(format!(
                        "Character {} missing from story {}",
                        my_character.character_id, my_story.story_id
                    ))
                })?;
            Ok(MyCharacterDetail {
                my_character,
                character,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(details))
}

/// POST /api/v1/mystories/{id}/characters
///
/// The referenced character must belong to the MyStory's story.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    PathParam(my_story_id): PathParam<DbId>,
    JsonBody(input): JsonBody<CreateMyCharacter>,
) -> AppResult<(StatusCode, Json<MyCharacterDetail>)> {
    input.validate()?;
    let my_story = load_owned(&state.pool, my_story_id, user.user_id).await?;

    let character = CharacterRepo::find_by_id(&state.pool, input.character_id)
        .await?
        .filter(|c| c.story_id == my_story.story_id)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Character {} is not part of story {}",
                input.character_id, my_story.story_id
            ))
        })?;

    let my_character = MyCharacterRepo::create(&state.pool, my_story_id, &input).await?;

    tracing::info!(
        my_character_id = my_character.id,
        my_story_id,
        character_id = character.id,
        user_id = user.user_id,
        "MyCharacter created",
    );

    Ok((
        StatusCode::CREATED,
        Json(MyCharacterDetail {
            my_character,
            character,
        }),
    ))
}

/// GET /api/v1/characters/{id}
pub async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<MyCharacterDetail>> {
    let my_character = MyCharacterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found("MyCharacter", id))?;

    let my_story = MyStoryRepo::find_by_id(&state.pool, my_character.my_story_id)
        .await?
        .ok_or(CoreError::not_found("MyStory", my_character.my_story_id))?;
    ensure_owner("MyCharacter", id, my_story.user_id, user.user_id)?;

    let character = CharacterRepo::find_by_id(&state.pool, my_character.character_id)
        .await?
        .ok_or(CoreError::not_found("Character", my_character.character_id))?;

    Ok(Json(MyCharacterDetail {
        my_character,
        character,
    }))
}
