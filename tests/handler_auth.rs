mod common;

use axum::http::header;
use serde_json::{Value, json};

#[tokio::test]
async fn test_login_returns_usable_token() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/auth/login")
        .json(&json!({
            "username": common::TEST_USERNAME,
            "password": common::TEST_PASSWORD
        }))
        .await;

    response.assert_status_ok();
    let token = response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string();

    server
        .get("/users")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_login_wrong_password_returns_401() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/auth/login")
        .json(&json!({ "username": common::TEST_USERNAME, "password": "nope" }))
        .await;

    response.assert_status_unauthorized();
    assert!(response.headers().get(header::WWW_AUTHENTICATE).is_some());
    assert_eq!(response.json::<Value>()["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_login_empty_credentials_returns_401() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/auth/login")
        .json(&json!({ "username": "", "password": "" }))
        .await;

    response.assert_status_unauthorized();
    assert_eq!(response.json::<Value>()["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_login_missing_fields_returns_400() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/auth/login")
        .json(&json!({ "username": "test" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_token_from_other_issuer_rejected() {
    let server = common::create_test_server(common::create_test_state());

    let mut settings = common::jwt_settings();
    settings.issuer = "someone-else".to_string();
    let foreign = layered_api::application::services::AuthService::new(
        &settings,
        "test".to_string(),
        "password".to_string(),
    );
    let token = foreign.issue_token("test").unwrap();

    let response = server.get("/users").authorization_bearer(&token).await;

    response.assert_status_unauthorized();
    assert_eq!(
        response.json::<Value>()["error"]["details"]["reason"],
        "Invalid token issuer"
    );
}
