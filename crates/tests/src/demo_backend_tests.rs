use pretty_assertions::assert_eq;
use server::backend::{CaseBackend, DemoBackend};
use shared_types::{
    AppErrorKind, AuthBackend, CaseDraft, LoginRequest, NewUser, Permissions, Role, UserUpdate,
};

fn draft(crime: &str) -> CaseDraft {
    CaseDraft {
        district: "Nagpur".into(),
        police_station: "Sitabuldi".into(),
        cr_no: "CR20250042".into(),
        section_of_law: "IPC 420".into(),
        crime_type: crime.into(),
        accused_name: "Amit Patel".into(),
        accused_address: "4 Lake Rd".into(),
        ..CaseDraft::blank(2025)
    }
}

#[tokio::test]
async fn case_crud_round_trip() {
    let demo = DemoBackend::with_cases(Vec::new());

    let created = demo.create_case(&draft("Fraud")).await.unwrap().unwrap();
    assert!(created.created_at.is_some());
    assert_eq!(demo.case_count().await.unwrap(), Some(1));

    let updated = demo.update_case(&created.id, &draft("Cyber Crime")).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.crime_type.as_deref(), Some("Cyber Crime"));
    assert_eq!(updated.created_at, created.created_at);

    let listed = demo.list_cases().await.unwrap();
    assert_eq!(listed, vec![updated.clone()]);

    demo.delete_case(&created.id).await.unwrap();
    assert!(demo.list_cases().await.unwrap().is_empty());

    let err = demo.delete_case(&created.id).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::NotFound);
}

#[tokio::test]
async fn newest_case_comes_first() {
    let demo = DemoBackend::with_cases(Vec::new());
    let first = demo.create_case(&draft("Theft")).await.unwrap().unwrap();
    let second = demo.create_case(&draft("Fraud")).await.unwrap().unwrap();
    assert_ne!(first.id, second.id);

    let ids: Vec<String> = demo.list_cases().await.unwrap().into_iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[tokio::test]
async fn counts_follow_the_store() {
    let demo = DemoBackend::with_cases(Vec::new());
    for crime in ["Theft", "Fraud", "Theft"] {
        demo.create_case(&draft(crime)).await.unwrap();
    }
    let counts = demo.crime_type_counts().await.unwrap();
    assert_eq!(counts[0].name, "Theft");
    assert_eq!(counts[0].value, 2);
    assert_eq!(demo.case_count().await.unwrap(), Some(3));
}

#[tokio::test]
async fn registered_users_can_log_in_and_be_managed() {
    let demo = DemoBackend::seeded(0, 1);
    demo.register(&NewUser {
        user_name: "clerk".into(),
        password: "secret1".into(),
        user_role: Role::User,
        permissions: Permissions {
            case_entry: true,
            ..Default::default()
        },
    })
    .await
    .unwrap();

    let duplicate = demo
        .register(&NewUser {
            user_name: "clerk".into(),
            password: "other12".into(),
            user_role: Role::User,
            permissions: Permissions::default(),
        })
        .await
        .unwrap_err();
    assert_eq!(duplicate.kind, AppErrorKind::BadRequest);

    let users = demo.list_users().await.unwrap();
    assert_eq!(users.len(), 2);
    let clerk = users.iter().find(|u| u.user_name == "clerk").unwrap().clone();

    demo.update_user(&UserUpdate {
        id: clerk.id.clone(),
        user_name: clerk.user_name.clone(),
        user_role: Role::Admin,
        permissions: Permissions::ALL_GRANTED,
        updated_by: "admin".into(),
        password: Some("newpass1".into()),
    })
    .await
    .unwrap();

    let login = demo
        .login(&LoginRequest {
            user_name: "clerk".into(),
            password: "newpass1".into(),
        })
        .await
        .unwrap();
    let user = login.authenticated_user().unwrap();
    assert_eq!(user.user_role, Role::Admin);
    assert_eq!(user.permissions, Permissions::ALL_GRANTED);

    demo.delete_user(&clerk.id).await.unwrap();
    assert_eq!(demo.list_users().await.unwrap().len(), 1);
}
