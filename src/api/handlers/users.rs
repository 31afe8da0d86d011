//! Handlers for user CRUD endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use crate::api::dto::users::UserListQuery;
use crate::api::extractors::ValidatedJson;
use crate::application::dto::{CreateUserDto, UpdateUserDto, UserDto};
use crate::error::AppError;
use crate::state::AppState;

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| {
        AppError::bad_request("Invalid user id", json!({ "id": raw }))
    })
}

fn user_not_found(id: Uuid) -> AppError {
    AppError::not_found("User not found", json!({ "id": id }))
}

/// Lists users, optionally filtered by email domain.
///
/// # Endpoint
///
/// `GET /users`
/// `GET /users?email_domain=example.com`
///
/// The unfiltered list is served through the cache. The domain filter always
/// reads the store.
pub async fn list_users_handler(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Vec<UserDto>>, AppError> {
    let users = match query.email_domain {
        Some(domain) => state.user_service.get_by_email_domain(&domain).await?,
        None => state.user_service.get_all().await?,
    };

    Ok(Json(users))
}

/// Returns a single user.
///
/// # Endpoint
///
/// `GET /users/{id}`
///
/// # Errors
///
/// - `400` if `id` is not a UUID
/// - `404` if no such user exists
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserDto>, AppError> {
    let id = parse_id(&id)?;

    state
        .user_service
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| user_not_found(id))
}

/// Creates a user and returns it with a `Location` header.
///
/// # Endpoint
///
/// `POST /users`
///
/// # Request Body
///
/// ```json
/// {
///   "full_name": "Ada Lovelace",
///   "email": "ada@example.com",
///   "phone": "+44 20 7946 0000"
/// }
/// ```
pub async fn create_user_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let id = state.user_service.create(payload).await?;

    let created = state.user_service.get_by_id(id).await?.ok_or_else(|| {
        AppError::internal("Created user could not be read back", json!({ "id": id }))
    })?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/users/{}", id))],
        Json(created),
    ))
}

/// Replaces a user.
///
/// # Endpoint
///
/// `PUT /users/{id}`
///
/// # Errors
///
/// - `400` if the body is invalid or its `id` differs from the URL
/// - `404` if no such user exists
pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateUserDto>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;

    if payload.id != id {
        return Err(AppError::bad_request(
            "Body id does not match URL id",
            json!({ "url_id": id, "body_id": payload.id }),
        ));
    }

    if !state.user_service.update(payload).await? {
        return Err(user_not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Deletes a user.
///
/// # Endpoint
///
/// `DELETE /users/{id}`
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;

    if !state.user_service.delete(id).await? {
        return Err(user_not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}
