//! JWT-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use revise_core::error::CoreError;
use revise_core::types::DbId;
use revise_db::models::user::User;

use crate::auth::jwt::validate_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// The token's user is loaded from the store on every request, so tokens for
/// deleted or unknown accounts are rejected even while their signature is valid.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The stored user row the token resolved to.
    pub user: User,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state).await
    }
}

/// Optional authentication: `Some(user_id)` for a valid bearer token,
/// `None` for anonymous callers or tokens that fail validation.
#[derive(Debug, Clone, Copy)]
pub struct MaybeAuthUser(pub Option<DbId>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(MaybeAuthUser(None));
        }
        match authenticate(parts, state).await {
            Ok(user) => Ok(MaybeAuthUser(Some(user.user_id))),
            Err(AppError::Core(err)) => {
                tracing::debug!(
                    error = %err,
                    "Ignoring invalid credentials on optional-auth route"
                );
                Ok(MaybeAuthUser(None))
            }
            Err(err) => Err(err),
        }
    }
}

/// Resolve the bearer token in `parts` to a stored user.
async fn authenticate(parts: &Parts, state: &AppState) -> AppResult<AuthUser> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))?;

    let claims = validate_token(token.trim(), &state.config.jwt)
        .map_err(|_| unauthorized("Invalid or expired token"))?;

    let user = state
        .store
        .find_user_by_id(claims.sub)
        .await?
        .filter(|user| user.email == claims.email)
        .ok_or_else(|| {
            tracing::info!(user_id = claims.sub, "Token does not match a stored user");
            unauthorized("User no longer exists")
        })?;

    Ok(AuthUser {
        user_id: user.id,
        user,
    })
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}
