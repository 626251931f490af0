use std::sync::Arc;

use revise_db::Store;
use revise_llm::CompletionProvider;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (everything is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// User and revision storage backend.
    pub store: Arc<dyn Store>,
    /// Completion provider used by the generation endpoint.
    pub completions: Arc<dyn CompletionProvider>,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
}
