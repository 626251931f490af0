//! Handlers for the static catalog and the API root.

use axum::Json;
use revise_core::catalog::{self, RevisionTypeEntry, SubjectEntry};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SubjectsResponse {
    pub subjects: Vec<SubjectEntry>,
}

#[derive(Debug, Serialize)]
pub struct RevisionTypesResponse {
    pub types: Vec<RevisionTypeEntry>,
}

/// GET /api
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "3ème Goya Révisions API",
    })
}

/// GET /api/subjects
pub async fn list_subjects() -> Json<SubjectsResponse> {
    Json(SubjectsResponse {
        subjects: catalog::subjects(),
    })
}

/// GET /api/revision-types
pub async fn list_revision_types() -> Json<RevisionTypesResponse> {
    Json(RevisionTypesResponse {
        types: catalog::revision_types(),
    })
}
