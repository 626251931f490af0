//! Handlers for the `/revisions` resource.
//!
//! Every route requires authentication, and every lookup is scoped to the
//! caller: another user's revision is reported as not found.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use revise_core::catalog::{RevisionType, Subject};
use revise_core::error::CoreError;
use revise_core::markup::render_markup;
use revise_core::revision::{ValidRevision, MAX_LIST_LIMIT};
use revise_core::types::DbId;
use revise_db::models::revision::{CreateRevision, Revision, RevisionFilter};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveRevisionRequest {
    pub prompt: String,
    pub subject: String,
    pub revision_type: String,
    pub content: String,
}

/// Query parameters for `GET /api/revisions`.
#[derive(Debug, Default, Deserialize)]
pub struct ListRevisionsParams {
    pub subject: Option<String>,
    pub revision_type: Option<String>,
    pub limit: Option<i64>,
}

impl ListRevisionsParams {
    /// Validate catalog ids and build the store filter.
    fn into_filter(self) -> Result<RevisionFilter, CoreError> {
        let subject = self
            .subject
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim().parse::<Subject>())
            .transpose()?;
        let revision_type = self
            .revision_type
            .filter(|t| !t.trim().is_empty())
            .map(|t| t.trim().parse::<RevisionType>())
            .transpose()?;

        Ok(RevisionFilter {
            subject: subject.map(|s| s.id().to_string()),
            revision_type: revision_type.map(|t| t.id().to_string()),
            limit: self.limit.unwrap_or(MAX_LIST_LIMIT),
        })
    }
}

/// POST /api/revisions
pub async fn save_revision(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<SaveRevisionRequest>,
) -> AppResult<(StatusCode, Json<Revision>)> {
    let valid = ValidRevision::parse(
        &body.prompt,
        &body.subject,
        &body.revision_type,
        &body.content,
    )?;

    let revision = state
        .store
        .create_revision(&CreateRevision {
            user_id: auth.user_id,
            subject: valid.subject.id().to_string(),
            revision_type: valid.revision_type.id().to_string(),
            prompt: valid.prompt,
            content: valid.content,
        })
        .await?;

    tracing::info!(
        user_id = auth.user_id,
        revision_id = revision.id,
        subject = %revision.subject,
        revision_type = %revision.revision_type,
        "Revision saved"
    );

    Ok((StatusCode::CREATED, Json(revision)))
}

/// GET /api/revisions
///
/// Newest first, at most 100 entries.
pub async fn list_revisions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListRevisionsParams>,
) -> AppResult<Json<Vec<Revision>>> {
    let filter = params.into_filter()?;
    let revisions = state.store.list_revisions(auth.user_id, &filter).await?;
    Ok(Json(revisions))
}

/// GET /api/revisions/{id}
pub async fn get_revision(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Revision>> {
    find_owned(&state, auth.user_id, id).await.map(Json)
}

/// GET /api/revisions/{id}/html
///
/// The revision content rendered to HTML, for printing.
pub async fn render_revision(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Html<String>> {
    let revision = find_owned(&state, auth.user_id, id).await?;
    Ok(Html(render_markup(&revision.content)))
}

/// DELETE /api/revisions/{id}
pub async fn delete_revision(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = state.store.delete_revision(auth.user_id, id).await?;
    if !deleted {
        return Err(not_found(id));
    }

    tracing::info!(user_id = auth.user_id, revision_id = id, "Revision deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_owned(state: &AppState, user_id: DbId, id: DbId) -> AppResult<Revision> {
    state
        .store
        .find_revision(user_id, id)
        .await?
        .ok_or_else(|| not_found(id))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Revision",
        id,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn list_params_default_to_unfiltered() {
        let filter = ListRevisionsParams::default().into_filter().unwrap();
        assert_eq!(filter, RevisionFilter::default());
    }

    #[test]
    fn list_params_accept_known_ids_and_ignore_blanks() {
        let filter = ListRevisionsParams {
            subject: Some(" maths ".to_string()),
            revision_type: Some(String::new()),
            limit: Some(5),
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.subject.as_deref(), Some("maths"));
        assert_eq!(filter.revision_type, None);
        assert_eq!(filter.limit(), 5);
    }

    #[test]
    fn list_params_reject_unknown_ids() {
        let result = ListRevisionsParams {
            revision_type: Some("essay".to_string()),
            ..Default::default()
        }
        .into_filter();
        assert_matches!(result, Err(CoreError::InvalidRequest(_)));
    }
}
