//! Request extractors that gate handlers.
//!
//! - [`auth::AuthUser`] -- the authenticated user from a JWT Bearer token.

pub mod auth;
