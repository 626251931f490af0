use axum::routing::post;
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

/// `POST /generate`, merged at the `/api` root.
pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(generation::generate))
}
