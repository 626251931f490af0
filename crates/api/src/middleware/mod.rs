//! Request extractors for authentication.
//!
//! - [`auth::AuthUser`] -- requires a valid bearer token.
//! - [`auth::MaybeAuthUser`] -- accepts anonymous callers.

pub mod auth;
