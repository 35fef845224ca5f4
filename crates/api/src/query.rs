//! Query parameter types for list endpoints.

use serde::Deserialize;
use taleweave_core::types::DbId;

/// `GET /mystories?story_id=` filter. `id` is accepted as an alias.
#[derive(Debug, Default, Deserialize)]
pub struct MyStoryListParams {
    #[serde(alias = "id")]
    pub story_id: Option<DbId>,
}
