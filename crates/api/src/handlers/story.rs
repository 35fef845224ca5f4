//! Handlers for the `/stories` catalog.

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use taleweave_core::error::CoreError;
use taleweave_core::types::DbId;
use taleweave_db::models::story::StoryDetail;
use taleweave_db::repositories::{BranchRepo, CharacterRepo, StoryRepo};

use crate::error::AppResult;
use crate::extract::PathParam;
use crate::state::AppState;

/// GET /api/v1/stories
///
/// Every story in detail form, fetched with one query per table.
pub async fn list_stories(State(state): State<AppState>) -> AppResult<Json<Vec<StoryDetail>>> {
    let stories = StoryRepo::list(&state.pool).await?;
    let ids: Vec<DbId> = stories.iter().map(|s| s.id).collect();

    let mut characters: HashMap<DbId, Vec<_>> = HashMap::new();
    for character in CharacterRepo::list_by_stories(&state.pool, &ids).await? {
        characters.entry(character.story_id).or_default().push(character);
    }
    let mut branches: HashMap<DbId, Vec<_>> = HashMap::new();
    for branch in BranchRepo::list_by_stories(&state.pool, &ids).await? {
        branches.entry(branch.story_id).or_default().push(branch);
    }

    let details = stories
        .into_iter()
        .map(|story| StoryDetail {
            characters: characters.remove(&story.id).unwrap_or_default(),
            branches: branches.remove(&story.id).unwrap_or_default(),
            story,
        })
        .collect();

    Ok(Json(details))
}

/// GET /api/v1/stories/{story_id}
///
/// The story with its characters and branches.
pub async fn get_story(
    State(state): State<AppState>,
    PathParam(story_id): PathParam<DbId>,
) -> AppResult<Json<StoryDetail>> {
    let story = StoryRepo::find_by_id(&state.pool, story_id)
        .await?
        .ok_or(CoreError::not_found("Story", story_id))?;

    let characters = CharacterRepo::list_by_story(&state.pool, story_id).await?;
    let branches = BranchRepo::list_by_story(&state.pool, story_id).await?;

    Ok(Json(StoryDetail {
        story,
        characters,
        branches,
    }))
}
