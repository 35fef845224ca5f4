//! Domain types, errors, and pure logic shared by the database and API crates.

pub mod chain;
pub mod error;
pub mod images;
pub mod overlay;
pub mod types;
