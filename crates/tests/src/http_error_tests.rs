use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use server::backend::CaseBackend;
use shared_types::AppErrorKind;

use crate::common::{unreachable_backend, MockBackend};

async fn list_error(status: StatusCode, body: serde_json::Value) -> shared_types::AppError {
    MockBackend::new()
        .json(Method::GET, "/auth/data/getdata", status, body)
        .start()
        .await
        .backend
        .list_cases()
        .await
        .unwrap_err()
}

#[tokio::test]
async fn statuses_map_to_error_kinds() {
    let cases = [
        (StatusCode::BAD_REQUEST, AppErrorKind::BadRequest),
        (StatusCode::UNPROCESSABLE_ENTITY, AppErrorKind::BadRequest),
        (StatusCode::UNAUTHORIZED, AppErrorKind::Unauthorized),
        (StatusCode::FORBIDDEN, AppErrorKind::Forbidden),
        (StatusCode::NOT_FOUND, AppErrorKind::NotFound),
        (StatusCode::INTERNAL_SERVER_ERROR, AppErrorKind::Upstream),
        (StatusCode::BAD_GATEWAY, AppErrorKind::Upstream),
    ];
    for (status, kind) in cases {
        let err = list_error(status, json!({})).await;
        assert_eq!(err.kind, kind, "status {status}");
    }
}

#[tokio::test]
async fn backend_message_wins() {
    let err = list_error(StatusCode::BAD_REQUEST, json!({"message": "CR number taken"})).await;
    assert_eq!(err.message, "CR number taken");

    let err = list_error(StatusCode::FORBIDDEN, json!({"error": "admins only"})).await;
    assert_eq!(err.message, "admins only");
}

#[tokio::test]
async fn generic_message_without_body() {
    let err = list_error(StatusCode::SERVICE_UNAVAILABLE, json!(null)).await;
    assert_eq!(err.message, "Backend responded with status 503");
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let err = unreachable_backend().list_cases().await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Upstream);
    assert!(err.is_transport());
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let mock = MockBackend::new().start().await;
    let err = mock.backend.case_count().await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::NotFound);
    assert_eq!(err.message, "no such route");
}
