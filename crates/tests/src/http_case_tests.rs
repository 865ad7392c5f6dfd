use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use server::backend::CaseBackend;
use shared_types::{CaseDraft, ChartDatum, Gender};

use crate::common::{wire_case, MockBackend};

fn draft() -> CaseDraft {
    CaseDraft {
        district: "Mumbai".into(),
        police_station: "Andheri".into(),
        cr_no: "CR20240001".into(),
        section_of_law: "IPC 379".into(),
        crime_type: "Theft".into(),
        accused_name: "Rahul Sharma".into(),
        accused_gender: Gender::Male,
        accused_age: 31,
        accused_address: "12 Main Rd".into(),
        ..CaseDraft::blank(2024)
    }
}

#[tokio::test]
async fn case_list_accepts_bare_arrays() {
    let mock = MockBackend::new()
        .json(
            Method::GET,
            "/auth/data/getdata",
            StatusCode::OK,
            json!([wire_case("1", "Mumbai", "Theft"), wire_case("2", "Pune", "Fraud")]),
        )
        .start()
        .await;

    let cases = mock.backend.list_cases().await.unwrap();
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[1].district.as_deref(), Some("Pune"));
    assert_eq!(cases[0].year, Some(2024));
    assert_eq!(cases[0].accused_age, Some(31));
}

#[tokio::test]
async fn case_list_unwraps_data_and_skips_junk() {
    let mock = MockBackend::new()
        .json(
            Method::GET,
            "/auth/data/getdata",
            StatusCode::OK,
            json!({"data": [wire_case("1", "Mumbai", "Theft"), 42, "junk"]}),
        )
        .start()
        .await;

    let cases = mock.backend.list_cases().await.unwrap();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].id, "1");
}

#[tokio::test]
async fn unexpected_list_shape_is_empty() {
    let mock = MockBackend::new()
        .json(
            Method::GET,
            "/auth/data/getdata",
            StatusCode::OK,
            json!({"message": "nothing here"}),
        )
        .start()
        .await;

    assert!(mock.backend.list_cases().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_returns_the_echoed_case() {
    let mock = MockBackend::new()
        .json(
            Method::POST,
            "/auth/data/newdata",
            StatusCode::CREATED,
            json!({"message": "created", "data": wire_case("new-1", "Mumbai", "Theft")}),
        )
        .start()
        .await;

    let created = mock.backend.create_case(&draft()).await.unwrap().unwrap();
    assert_eq!(created.id, "new-1");

    let sent = mock.only_request().body;
    assert_eq!(sent["Crime_type"], "Theft");
    assert_eq!(sent["CR_NO"], "CR20240001");
    assert_eq!(sent["Accused_Age"], 31);
}

#[tokio::test]
async fn create_without_echo_succeeds_empty() {
    let mock = MockBackend::new()
        .json(
            Method::POST,
            "/auth/data/newdata",
            StatusCode::OK,
            json!({"message": "Data saved"}),
        )
        .start()
        .await;

    assert_eq!(mock.backend.create_case(&draft()).await.unwrap(), None);
}

#[tokio::test]
async fn update_falls_back_to_the_submitted_draft() {
    let mock = MockBackend::new()
        .json(
            Method::PUT,
            "/auth/data/update/7",
            StatusCode::OK,
            json!({"message": "updated"}),
        )
        .start()
        .await;

    let updated = mock.backend.update_case("7", &draft()).await.unwrap();
    assert_eq!(updated.id, "7");
    assert_eq!(updated.crime_type.as_deref(), Some("Theft"));
    assert_eq!(mock.only_request().method, Method::PUT);
}

#[tokio::test]
async fn update_prefers_the_echoed_record() {
    let mock = MockBackend::new()
        .json(
            Method::PUT,
            "/auth/data/update/7",
            StatusCode::OK,
            wire_case("7", "Thane", "Fraud"),
        )
        .start()
        .await;

    let updated = mock.backend.update_case("7", &draft()).await.unwrap();
    assert_eq!(updated.district.as_deref(), Some("Thane"));
}

#[tokio::test]
async fn delete_case_hits_the_id_path() {
    let mock = MockBackend::new()
        .json(
            Method::DELETE,
            "/auth/data/delete/7",
            StatusCode::OK,
            json!({"message": "deleted"}),
        )
        .start()
        .await;

    mock.backend.delete_case("7").await.unwrap();
    let sent = mock.only_request();
    assert_eq!(sent.method, Method::DELETE);
    assert_eq!(sent.path, "/auth/data/delete/7");
}

#[tokio::test]
async fn crime_type_counts_accept_both_shapes() {
    let mock = MockBackend::new()
        .json(
            Method::GET,
            "/auth/data/crimetypecount",
            StatusCode::OK,
            json!([
                {"Crime_type": "Theft", "count": 12},
                {"crime_type": "Fraud", "count": "4"},
                {"count": 1}
            ]),
        )
        .start()
        .await;

    let counts = mock.backend.crime_type_counts().await.unwrap();
    assert_eq!(
        counts,
        vec![
            ChartDatum::new("Theft", 12),
            ChartDatum::new("Fraud", 4),
            ChartDatum::new("Unknown", 1),
        ]
    );

    let mock = MockBackend::new()
        .json(
            Method::GET,
            "/auth/data/crimetypecount",
            StatusCode::OK,
            json!({"Theft": 3}),
        )
        .start()
        .await;
    assert_eq!(
        mock.backend.crime_type_counts().await.unwrap(),
        vec![ChartDatum::new("Theft", 3)]
    );
}

#[tokio::test]
async fn case_count_reads_total_or_number() {
    let mock = MockBackend::new()
        .json(
            Method::GET,
            "/auth/data/casecount",
            StatusCode::OK,
            json!({"total": 128}),
        )
        .start()
        .await;
    assert_eq!(mock.backend.case_count().await.unwrap(), Some(128));

    let mock = MockBackend::new()
        .raw(Method::GET, "/auth/data/casecount", StatusCode::OK, "57")
        .start()
        .await;
    assert_eq!(mock.backend.case_count().await.unwrap(), Some(57));

    let mock = MockBackend::new()
        .json(
            Method::GET,
            "/auth/data/casecount",
            StatusCode::OK,
            json!({"count": "n/a"}),
        )
        .start()
        .await;
    assert_eq!(mock.backend.case_count().await.unwrap(), None);
}
