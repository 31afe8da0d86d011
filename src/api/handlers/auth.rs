//! Handler for the login endpoint.

use axum::{Json, extract::State};

use crate::api::dto::auth::{LoginRequest, LoginResponse};
use crate::api::extractors::ValidatedJson;
use crate::error::AppError;
use crate::state::AppState;

/// Exchanges the configured credentials for a bearer token.
///
/// # Endpoint
///
/// `POST /auth/login`
///
/// # Response
///
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiJ9..." }
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` if the credentials do not match.
pub async fn login_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let token = state
        .auth_service
        .login(&payload.username, &payload.password)?;

    Ok(Json(LoginResponse { token }))
}
