//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` + `Validate` DTOs for the writes the API allows
//! - Composite response shapes assembled by the handlers

pub mod branch;
pub mod character;
pub mod my_character;
pub mod my_story;
pub mod my_substory;
pub mod script;
pub mod story;
pub mod substory;
