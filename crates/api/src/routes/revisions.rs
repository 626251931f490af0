//! Route definitions for the `/revisions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::revisions;
use crate::state::AppState;

/// Routes mounted at `/revisions`. All require auth.
///
/// ```text
/// GET    /           -> list_revisions
/// POST   /           -> save_revision
/// GET    /{id}       -> get_revision
/// DELETE /{id}       -> delete_revision
/// GET    /{id}/html  -> render_revision
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(revisions::list_revisions).post(revisions::save_revision),
        )
        .route(
            "/{id}",
            get(revisions::get_revision).delete(revisions::delete_revision),
        )
        .route("/{id}/html", get(revisions::render_revision))
}
