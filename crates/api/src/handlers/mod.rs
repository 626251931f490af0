//! Request handlers, one module per resource.
//!
//! Handlers validate input through `revise_core`, talk to the store or the
//! completion provider held in [`AppState`](crate::state::AppState), and map
//! failures via [`AppError`](crate::error::AppError).

pub mod auth;
pub mod catalog;
pub mod generation;
pub mod revisions;
