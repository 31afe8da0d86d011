mod common;

use axum::http::{HeaderValue, StatusCode, header};
use serde_json::{Value, json};
use uuid::Uuid;

#[tokio::test]
async fn test_create_user_returns_location_and_body() {
    let server = common::create_test_server(common::create_test_state());
    let token = common::valid_token();

    let response = server
        .post("/users")
        .authorization_bearer(&token)
        .json(&common::user_payload("Ada Lovelace", "ada@example.com"))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    let id = json["id"].as_str().unwrap();
    assert!(Uuid::parse_str(id).is_ok());
    assert_eq!(json["full_name"], "Ada Lovelace");
    assert_eq!(json["email"], "ada@example.com");
    assert_eq!(json["phone"], "+1 555 0100");

    let location = response.headers().get(header::LOCATION).unwrap();
    assert_eq!(location.to_str().unwrap(), format!("/users/{}", id));
}

#[tokio::test]
async fn test_get_user_round_trip() {
    let server = common::create_test_server(common::create_test_state());
    let token = common::valid_token();
    let id = common::create_user(&server, &token, "Grace Hopper", "grace@navy.mil").await;

    let response = server
        .get(&format!("/users/{}", id))
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["id"], id.as_str());
    assert_eq!(json["full_name"], "Grace Hopper");
}

#[tokio::test]
async fn test_get_unknown_user_returns_404() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .get(&format!("/users/{}", Uuid::new_v4()))
        .authorization_bearer(common::valid_token())
        .await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_get_malformed_id_returns_400() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .get("/users/not-a-uuid")
        .authorization_bearer(common::valid_token())
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_list_users() {
    let server = common::create_test_server(common::create_test_state());
    let token = common::valid_token();

    let empty = server.get("/users").authorization_bearer(&token).await;
    empty.assert_status_ok();
    assert_eq!(empty.json::<Value>(), json!([]));

    common::create_user(&server, &token, "First User", "first@x.com").await;
    common::create_user(&server, &token, "Second User", "second@y.com").await;

    let response = server.get("/users").authorization_bearer(&token).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Vec<Value>>().len(), 2);
}

#[tokio::test]
async fn test_list_users_by_email_domain() {
    let server = common::create_test_server(common::create_test_state());
    let token = common::valid_token();
    common::create_user(&server, &token, "Alice Example", "a@x.com").await;
    common::create_user(&server, &token, "Bob Example", "b@y.com").await;

    let response = server
        .get("/users")
        .add_query_param("email_domain", "x.com")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let users = response.json::<Vec<Value>>();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "a@x.com");
}

#[tokio::test]
async fn test_create_user_validation_errors() {
    let server = common::create_test_server(common::create_test_state());
    let token = common::valid_token();

    let response = server
        .post("/users")
        .authorization_bearer(&token)
        .json(&json!({ "full_name": "", "email": "not-an-email" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(json["error"]["details"].get("full_name").is_some());
    assert!(json["error"]["details"].get("email").is_some());
}

#[tokio::test]
async fn test_create_user_malformed_json_returns_400() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/users")
        .authorization_bearer(common::valid_token())
        .json(&json!({ "full_name": 42 }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_update_user_then_read_reflects_change() {
    let server = common::create_test_server(common::create_test_state());
    let token = common::valid_token();
    let id = common::create_user(&server, &token, "Before Update", "u@x.com").await;

    // Warm the list and item caches.
    server.get("/users").authorization_bearer(&token).await;
    server
        .get(&format!("/users/{}", id))
        .authorization_bearer(&token)
        .await;

    let response = server
        .put(&format!("/users/{}", id))
        .authorization_bearer(&token)
        .json(&json!({
            "id": id,
            "full_name": "After Update",
            "email": "u@x.com"
        }))
        .await;

    response.assert_status(StatusCode::NO_CONTENT);

    let item = server
        .get(&format!("/users/{}", id))
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(item["full_name"], "After Update");
    assert_eq!(item["phone"], Value::Null);

    let list = server
        .get("/users")
        .authorization_bearer(&token)
        .await
        .json::<Vec<Value>>();
    assert_eq!(list[0]["full_name"], "After Update");
}

#[tokio::test]
async fn test_update_id_mismatch_returns_400() {
    let server = common::create_test_server(common::create_test_state());
    let token = common::valid_token();
    let id = common::create_user(&server, &token, "Mismatch User", "m@x.com").await;

    let response = server
        .put(&format!("/users/{}", id))
        .authorization_bearer(&token)
        .json(&json!({
            "id": Uuid::new_v4(),
            "full_name": "Mismatch User",
            "email": "m@x.com"
        }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_update_unknown_user_returns_404() {
    let server = common::create_test_server(common::create_test_state());
    let id = Uuid::new_v4();

    let response = server
        .put(&format!("/users/{}", id))
        .authorization_bearer(common::valid_token())
        .json(&json!({
            "id": id,
            "full_name": "Nobody Here",
            "email": "nobody@x.com"
        }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_user_twice() {
    let server = common::create_test_server(common::create_test_state());
    let token = common::valid_token();
    let id = common::create_user(&server, &token, "Short Lived", "s@x.com").await;

    let first = server
        .delete(&format!("/users/{}", id))
        .authorization_bearer(&token)
        .await;
    first.assert_status(StatusCode::NO_CONTENT);

    let second = server
        .delete(&format!("/users/{}", id))
        .authorization_bearer(&token)
        .await;
    second.assert_status_not_found();

    server
        .get(&format!("/users/{}", id))
        .authorization_bearer(&token)
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_users_require_token() {
    let server = common::create_test_server(common::create_test_state());

    let response = server.get("/users").await;

    response.assert_status_unauthorized();
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
    assert_eq!(response.json::<Value>()["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_users_reject_non_bearer_scheme() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .get("/users")
        .add_header(header::AUTHORIZATION, HeaderValue::from_static("Basic dGVzdDpwYXNzd29yZA=="))
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_users_reject_invalid_token() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/users")
        .authorization_bearer("definitely.not.valid")
        .json(&common::user_payload("Ada Lovelace", "ada@example.com"))
        .await;

    response.assert_status_unauthorized();

    let list = server
        .get("/users")
        .authorization_bearer(common::valid_token())
        .await;
    assert_eq!(list.json::<Vec<Value>>().len(), 0);
}
