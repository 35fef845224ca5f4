//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods that
//! accept `&PgPool` as the first argument. Methods that take part in the
//! finalization transaction accept `&mut PgConnection` instead.

pub mod branch_repo;
pub mod character_repo;
pub mod my_character_repo;
pub mod my_story_repo;
pub mod my_substory_repo;
pub mod script_repo;
pub mod story_repo;
pub mod substory_repo;

pub use branch_repo::BranchRepo;
pub use character_repo::CharacterRepo;
pub use my_character_repo::MyCharacterRepo;
pub use my_story_repo::MyStoryRepo;
pub use my_substory_repo::MySubstoryRepo;
pub use script_repo::ScriptRepo;
pub use story_repo::StoryRepo;
pub use substory_repo::SubstoryRepo;
