//! Handler for `POST /api/generate`.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use revise_core::error::CoreError;
use revise_core::generation::GenerationInput;
use revise_core::types::{DbId, Timestamp};
use revise_llm::{CompletionError, CompletionRequest};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub subject: String,
    pub revision_type: String,
    /// Optional image, bare base64 or a `data:` URL.
    #[serde(default)]
    pub image_base64: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub prompt: String,
    pub subject: &'static str,
    pub revision_type: &'static str,
    pub content: String,
    /// Present when the caller sent a valid bearer token.
    pub user_id: Option<DbId>,
    pub generated_at: Timestamp,
}

/// POST /api/generate
///
/// Ask the completion provider for study content. Authentication is optional
/// and the result is not persisted; clients save it through
/// `POST /api/revisions`.
pub async fn generate(
    State(state): State<AppState>,
    MaybeAuthUser(user_id): MaybeAuthUser,
    Json(body): Json<GenerateRequest>,
) -> AppResult<Json<GenerateResponse>> {
    let input = GenerationInput::parse(
        &body.prompt,
        &body.subject,
        &body.revision_type,
        body.image_base64.as_deref(),
    )?;

    let request = CompletionRequest {
        system: input.system_prompt(),
        user: input.user_message(),
        image_url: input.image.as_ref().map(|img| img.data_url()),
    };

    tracing::info!(
        user_id = ?user_id,
        subject = input.subject.id(),
        revision_type = input.revision_type.id(),
        has_image = input.image.is_some(),
        "Generating revision content"
    );

    let content = state
        .completions
        .complete(&request)
        .await
        .map_err(generation_failed)?;

    Ok(Json(GenerateResponse {
        prompt: input.prompt,
        subject: input.subject.id(),
        revision_type: input.revision_type.id(),
        content,
        user_id,
        generated_at: Utc::now(),
    }))
}

/// Log the provider error in full and return a short client-facing reason.
fn generation_failed(err: CompletionError) -> AppError {
    tracing::warn!(error = %err, "Completion provider failed");
    let reason = match err {
        CompletionError::NotConfigured => "AI service is not configured",
        CompletionError::Timeout => "AI service timed out",
        CompletionError::Api { .. } => "AI service returned an error",
        CompletionError::EmptyCompletion => "AI service returned no content",
        CompletionError::Request(_) => "AI service is unreachable",
    };
    AppError::Core(CoreError::GenerationFailed(reason.to_string()))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn provider_errors_become_generation_failed() {
        let err = generation_failed(CompletionError::Api {
            status: 500,
            body: "upstream secret detail".to_string(),
        });
        assert_matches!(
            err,
            AppError::Core(CoreError::GenerationFailed(ref msg))
                if msg == "AI service returned an error"
        );

        assert_matches!(
            generation_failed(CompletionError::Timeout),
            AppError::Core(CoreError::GenerationFailed(_))
        );
    }
}
