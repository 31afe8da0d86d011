#![allow(dead_code)]

use axum_test::TestServer;
use layered_api::application::services::AuthService;
use layered_api::config::JwtSettings;
use layered_api::infrastructure::cache::MemoryCache;
use layered_api::infrastructure::persistence::Store;
use layered_api::routes::api_router;
use layered_api::state::AppState;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

pub const TEST_USERNAME: &str = "test";
pub const TEST_PASSWORD: &str = "password";

pub fn jwt_settings() -> JwtSettings {
    JwtSettings {
        key: "integration-test-signing-key-0123456789".to_string(),
        issuer: "layered-api".to_string(),
        audience: "layered-api-clients".to_string(),
        expire_minutes: 60,
    }
}

pub fn auth_service() -> AuthService {
    AuthService::new(
        &jwt_settings(),
        TEST_USERNAME.to_string(),
        TEST_PASSWORD.to_string(),
    )
}

/// State over an empty in-memory store and in-memory cache.
pub fn create_test_state() -> AppState {
    AppState::with_settings(
        Store::memory(),
        Arc::new(MemoryCache::new(Duration::from_secs(300))),
        Duration::from_secs(300),
        auth_service(),
    )
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(api_router(state)).unwrap()
}

pub fn valid_token() -> String {
    auth_service().issue_token(TEST_USERNAME).unwrap()
}

pub fn user_payload(full_name: &str, email: &str) -> Value {
    json!({
        "full_name": full_name,
        "email": email,
        "phone": "+1 555 0100"
    })
}

/// Creates a user over HTTP and returns its id.
pub async fn create_user(server: &TestServer, token: &str, full_name: &str, email: &str) -> String {
    let response = server
        .post("/users")
        .authorization_bearer(token)
        .json(&user_payload(full_name, email))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"]
        .as_str()
        .unwrap()
        .to_string()
}
