//! API route configuration.

use crate::api::handlers::{
    create_user_handler, delete_user_handler, get_user_handler, list_users_handler,
    login_handler, update_user_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// User routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /users`        - List users (`?email_domain=` filters by domain)
/// - `POST   /users`        - Create a user
/// - `GET    /users/{id}`   - Fetch one user
/// - `PUT    /users/{id}`   - Replace a user
/// - `DELETE /users/{id}`   - Delete a user
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route(
            "/users/{id}",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
}

/// Routes reachable without a token.
///
/// - `POST /auth/login` - Exchange credentials for a token
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login_handler))
}
