//! Bearer-token validation primitives.
//!
//! Tokens are issued by the external identity service; this crate only
//! verifies them.

pub mod jwt;
