use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Static catalog routes, merged at the `/api` root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/subjects", get(catalog::list_subjects))
        .route("/revision-types", get(catalog::list_revision_types))
}
