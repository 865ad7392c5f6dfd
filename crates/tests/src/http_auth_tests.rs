use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use server::backend::CaseBackend;
use shared_types::{
    AuthBackend, LoginRequest, NewUser, Permissions, Role, UserUpdate, LOGIN_SUCCESS_MESSAGE,
};

use crate::common::MockBackend;

fn request(user: &str, password: &str) -> LoginRequest {
    LoginRequest {
        user_name: user.into(),
        password: password.into(),
    }
}

#[tokio::test]
async fn login_posts_credentials_and_decodes_user() {
    let mock = MockBackend::new()
        .json(
            Method::POST,
            "/auth/api/login",
            StatusCode::OK,
            json!({
                "message": "Login successful",
                "token": "tok-1",
                "user": {
                    "_id": 17,
                    "user_name": "clerk",
                    "user_role": "user",
                    "case_entry": "1",
                    "case_view": "1",
                    "analytics": "0",
                    "chat": "0"
                }
            }),
        )
        .start()
        .await;

    let response = mock.backend.login(&request("clerk", "secret1")).await.unwrap();
    assert_eq!(response.message, LOGIN_SUCCESS_MESSAGE);
    assert_eq!(response.token.as_deref(), Some("tok-1"));
    let user = response.user.unwrap();
    assert_eq!(user.id, "17");
    assert_eq!(user.user_role, Role::User);
    assert!(user.permissions.case_entry);
    assert!(!user.permissions.analytics);

    let sent = mock.only_request();
    assert_eq!(sent.body, json!({"user_name": "clerk", "password": "secret1"}));
}

#[tokio::test]
async fn rejected_login_maps_to_unauthorized() {
    let mock = MockBackend::new()
        .json(
            Method::POST,
            "/auth/api/login",
            StatusCode::UNAUTHORIZED,
            json!({"message": "Invalid credentials"}),
        )
        .start()
        .await;

    let err = mock.backend.login(&request("clerk", "wrong")).await.unwrap_err();
    assert_eq!(err.kind, shared_types::AppErrorKind::Unauthorized);
    assert_eq!(err.message, "Invalid credentials");
    assert!(!err.is_transport());
}

#[tokio::test]
async fn register_sends_flags_as_strings() {
    let mock = MockBackend::new()
        .json(
            Method::POST,
            "/auth/api/register",
            StatusCode::CREATED,
            json!({"message": "User created"}),
        )
        .start()
        .await;

    let user = NewUser {
        user_name: "viewer".into(),
        password: "secret1".into(),
        user_role: Role::User,
        permissions: Permissions {
            case_view: true,
            ..Default::default()
        },
    };
    let message = mock.backend.register(&user).await.unwrap();
    assert_eq!(message, "User created");

    let sent = mock.only_request().body;
    assert_eq!(sent["user_role"], "user");
    assert_eq!(sent["case_view"], "1");
    assert_eq!(sent["case_entry"], "0");
    assert_eq!(sent["chat"], "0");
}

#[tokio::test]
async fn register_without_message_uses_default() {
    let mock = MockBackend::new()
        .raw(Method::POST, "/auth/api/register", StatusCode::OK, "")
        .start()
        .await;

    let user = NewUser {
        user_name: "viewer".into(),
        password: "secret1".into(),
        user_role: Role::User,
        permissions: Permissions::default(),
    };
    let message = mock.backend.register(&user).await.unwrap();
    assert_eq!(message, server::backend::REGISTERED_MESSAGE);
}

#[tokio::test]
async fn user_list_accepts_envelopes() {
    let mock = MockBackend::new()
        .json(
            Method::GET,
            "/auth/api/getallusers",
            StatusCode::OK,
            json!({
                "users": [
                    {"_id": "a1", "user_name": "admin", "user_role": "admin",
                     "case_entry": "1", "case_view": "1", "analytics": "1", "chat": "1"},
                    {"_id": "b2", "user_name": "viewer", "user_role": "user",
                     "case_view": "1"},
                    "not a user"
                ]
            }),
        )
        .start()
        .await;

    let users = mock.backend.list_users().await.unwrap();
    let names: Vec<&str> = users.iter().map(|u| u.user_name.as_str()).collect();
    assert_eq!(names, vec!["admin", "viewer"]);
    assert_eq!(users[0].permissions, Permissions::ALL_GRANTED);
    assert!(users[1].permissions.case_view);
    assert!(!users[1].permissions.chat);
}

#[tokio::test]
async fn update_user_puts_to_the_id_path() {
    let mock = MockBackend::new()
        .json(
            Method::PUT,
            "/auth/api/updateuser/b2",
            StatusCode::OK,
            json!({"message": "updated"}),
        )
        .start()
        .await;

    let update = UserUpdate {
        id: "b2".into(),
        user_name: "viewer".into(),
        user_role: Role::Admin,
        permissions: Permissions::ALL_GRANTED,
        updated_by: "admin".into(),
        password: None,
    };
    mock.backend.update_user(&update).await.unwrap();

    let sent = mock.only_request();
    assert_eq!(sent.method, Method::PUT);
    assert_eq!(sent.body["updated_by"], "admin");
    assert_eq!(sent.body["user_role"], "admin");
    assert_eq!(sent.body["analytics"], "1");
    assert!(sent.body.get("password").is_none());
}

#[tokio::test]
async fn delete_user_escapes_the_id() {
    let mock = MockBackend::new()
        .json(
            Method::DELETE,
            "/auth/api/deleteuser/a%2Fb",
            StatusCode::OK,
            json!({"message": "deleted"}),
        )
        .start()
        .await;

    mock.backend.delete_user("a/b").await.unwrap();
    assert_eq!(mock.only_request().path, "/auth/api/deleteuser/a%2Fb");
}
