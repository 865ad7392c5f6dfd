use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use server::backend::DemoBackend;
use shared_types::{
    MemoryStorage, Page, SessionStorage, SessionStore, TOKEN_KEY, USER_KEY,
};

use crate::common::{unreachable_backend, MockBackend};

fn login_reply(message: &str, token: Option<&str>) -> serde_json::Value {
    json!({
        "message": message,
        "token": token,
        "user": {
            "_id": "5",
            "user_name": "viewer",
            "user_role": "user",
            "case_view": "1"
        }
    })
}

fn fresh_store() -> SessionStore<MemoryStorage> {
    let mut store = SessionStore::new(MemoryStorage::new());
    store.restore();
    store
}

#[tokio::test]
async fn successful_login_persists_the_session() {
    let mock = MockBackend::new()
        .json(
            Method::POST,
            "/auth/api/login",
            StatusCode::OK,
            login_reply("Login successful", Some("tok-9")),
        )
        .start()
        .await;

    let mut store = fresh_store();
    assert!(store.login(&mock.backend, "viewer", "secret1").await.unwrap());
    assert!(store.is_authenticated());
    assert_eq!(store.token(), Some("tok-9"));
    assert!(store.can_access(Page::CaseView));
    assert!(!store.can_access(Page::CaseEntry));
    assert!(!store.can_access(Page::UserList));

    assert_eq!(store.storage().get(TOKEN_KEY).as_deref(), Some("tok-9"));
    let saved = store.storage().get(USER_KEY).unwrap();
    let mut reloaded = SessionStore::new(store.storage().clone());
    reloaded.restore();
    assert_eq!(reloaded.user().map(|u| u.user_name.as_str()), Some("viewer"));
    assert!(saved.contains("\"case_view\":\"1\""));
}

#[tokio::test]
async fn missing_token_is_fabricated() {
    let mock = MockBackend::new()
        .json(
            Method::POST,
            "/auth/api/login",
            StatusCode::OK,
            login_reply("Login successful", None),
        )
        .start()
        .await;

    let mut store = fresh_store();
    assert!(store.login(&mock.backend, "viewer", "secret1").await.unwrap());
    assert!(store.token().unwrap().starts_with("auth_"));
}

#[tokio::test]
async fn other_messages_do_not_authenticate() {
    let mock = MockBackend::new()
        .json(
            Method::POST,
            "/auth/api/login",
            StatusCode::OK,
            login_reply("Password expired", Some("tok")),
        )
        .start()
        .await;

    let mut store = fresh_store();
    assert!(!store.login(&mock.backend, "viewer", "secret1").await.unwrap());
    assert!(!store.is_authenticated());
    assert!(store.storage().is_empty());
}

#[tokio::test]
async fn transport_failure_is_an_error() {
    let mut store = fresh_store();
    let err = store
        .login(&unreachable_backend(), "viewer", "secret1")
        .await
        .unwrap_err();
    assert!(err.is_transport());
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn logout_clears_storage() {
    let demo = DemoBackend::seeded(2, 3);
    let mut store = fresh_store();
    assert!(store.login(&demo, "admin", "admin123").await.unwrap());
    assert_eq!(store.storage().len(), 2);

    store.logout();
    assert!(!store.is_authenticated());
    assert!(store.storage().is_empty());
}
