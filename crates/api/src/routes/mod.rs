pub mod auth;
pub mod catalog;
pub mod generation;
pub mod health;
pub mod revisions;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                    service banner
/// /subjects                            subject catalog
/// /revision-types                      revision type catalog
///
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/me                             current user (requires auth)
///
/// /generate                            generate content (optional auth)
///
/// /revisions                           list, save (requires auth)
/// /revisions/{id}                      get, delete
/// /revisions/{id}/html                 rendered content
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::catalog::root))
        .merge(catalog::router())
        .nest("/auth", auth::router())
        .merge(generation::router())
        .nest("/revisions", revisions::router())
}
