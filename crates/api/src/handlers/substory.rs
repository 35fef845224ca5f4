//! Handlers for substories: the canonical listing per story and the
//! per-user view with the character overlay applied.

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use taleweave_core::error::CoreError;
use taleweave_core::overlay::{overlay_lines, OverlaidLine};
use taleweave_core::types::DbId;
use taleweave_db::models::my_character::MyCharacterBasic;
use taleweave_db::models::script::ScriptLine;
use taleweave_db::models::substory::{Substory, SubstoryWithScripts};
use taleweave_db::repositories::{MyCharacterRepo, ScriptRepo, StoryRepo, SubstoryRepo};

use crate::error::AppResult;
use crate::extract::PathParam;
use crate::handlers::my_story::load_owned;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// A substory whose script lines carry the user's character assignments.
#[derive(Debug, Serialize)]
pub struct SubstoryOverlay {
    #[serde(flatten)]
    pub substory: Substory,
    pub scripts: Vec<OverlaidLine<ScriptLine, MyCharacterBasic>>,
}

/// GET /api/v1/stories/{story_id}/substories
pub async fn list_by_story(
    _user: AuthUser,
    State(state): State<AppState>,
    PathParam(story_id): PathParam<DbId>,
) -> AppResult<Json<Vec<SubstoryWithScripts>>> {
    if !StoryRepo::exists(&state.pool, story_id).await? {
        return Err(CoreError::not_found("Story", story_id).into());
    }

    let substories = SubstoryRepo::list_by_story(&state.pool, story_id).await?;
    let ids: Vec<DbId> = substories.iter().map(|s| s.id).collect();

    let mut scripts_by_substory: HashMap<DbId, Vec<ScriptLine>> = HashMap::new();
    for line in ScriptRepo::list_by_substories(&state.pool, &ids).await? {
        scripts_by_substory
            .entry(line.substory_id)
            .or_default()
            .push(line);
    }

    let result = substories
        .into_iter()
        .map(|substory| SubstoryWithScripts {
            scripts: scripts_by_substory.remove(&substory.id).unwrap_or_default(),
            substory,
        })
        .collect();

    Ok(Json(result))
}

/// GET /api/v1/mystories/{id}/substories/{substory_id}
///
/// Each script line gets a `mycharacter` entry: the user's assignments for
/// that line's character within this MyStory, oldest first, or `{}` when
/// there are none.
pub async fn get_with_overlay(
    user: AuthUser,
    State(state): State<AppState>,
    PathParam((my_story_id, substory_id)): PathParam<(DbId, DbId)>,
) -> AppResult<Json<SubstoryOverlay>> {
    load_owned(&state.pool, my_story_id, user.user_id).await?;

    let substory = SubstoryRepo::find_by_id(&state.pool, substory_id)
        .await?
        .ok_or(CoreError::not_found("Substory", substory_id))?;
    let lines = ScriptRepo::list_by_substory(&state.pool, substory_id).await?;

    let mut character_ids: Vec<DbId> = lines.iter().map(|l| l.character.id).collect();
    character_ids.sort_unstable();
    character_ids.dedup();

    let assignments =
        MyCharacterRepo::list_basic_for_characters(&state.pool, my_story_id, &character_ids)
            .await?;

    let scripts = overlay_lines(
        lines,
        assignments,
        |line| line.character.id,
        |assigned| assigned.character_id,
    );

    Ok(Json(SubstoryOverlay { substory, scripts }))
}
