use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use server::school_api::{Caller, SchoolApi};
use shared_types::{AppErrorKind, LoginRequest, Role};
use std::time::Duration;

use crate::common::{self, FakeSchool, TEACHER_EMAIL, TEACHER_PASSWORD, TEACHER_TOKEN};

fn teacher() -> Caller {
    Caller::with_token(TEACHER_TOKEN)
}

#[tokio::test]
async fn login_returns_token_and_user() {
    let api = common::spawn_fake_school(FakeSchool::default()).await;
    let credentials = LoginRequest {
        email: TEACHER_EMAIL.into(),
        password: TEACHER_PASSWORD.into(),
    };

    let auth = api.login(&credentials, &Caller::default()).await.unwrap();
    assert_eq!(auth.access_token, TEACHER_TOKEN);
    assert_eq!(auth.user.id, "u-1");
    assert_eq!(auth.user.role, Role::Teacher);
    assert_eq!(auth.user.full_name(), "Ada Obi");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let api = common::spawn_fake_school(FakeSchool::default()).await;
    let credentials = LoginRequest {
        email: TEACHER_EMAIL.into(),
        password: "nope".into(),
    };

    let err = api.login(&credentials, &Caller::default()).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Unauthorized);
    assert_eq!(err.message, "Invalid email or password");
}

#[tokio::test]
async fn me_resolves_user_or_none() {
    let api = common::spawn_fake_school(FakeSchool::default()).await;

    let user = api.me(&teacher()).await.unwrap();
    assert_eq!(user.map(|u| u.email), Some(TEACHER_EMAIL.to_string()));

    assert_eq!(api.me(&Caller::with_token("expired")).await.unwrap(), None);
    assert_eq!(api.me(&Caller::default()).await.unwrap(), None);
}

#[tokio::test]
async fn classes_body_is_passed_through_verbatim() {
    let body = r#"[{"_id":"c1","name":"Grade 5A","totalStudents":30,"subjects":[1,2]}]"#;
    let api = common::spawn_fake_school(FakeSchool::default().with_classes(body)).await;

    assert_eq!(api.teacher_classes(&teacher()).await.unwrap(), body);
}

#[tokio::test]
async fn malformed_classes_body_is_still_passed_through() {
    let api = common::spawn_fake_school(FakeSchool::default().with_classes("{}")).await;
    assert_eq!(api.teacher_classes(&teacher()).await.unwrap(), "{}");
}

#[tokio::test]
async fn request_id_is_forwarded() {
    let fake = FakeSchool::default();
    let api = common::spawn_fake_school(fake.clone()).await;
    let caller = Caller {
        token: Some(TEACHER_TOKEN.into()),
        request_id: Some("req-42".into()),
    };

    api.teacher_classes(&caller).await.unwrap();
    assert_eq!(
        fake.last_request_id.lock().unwrap().as_deref(),
        Some("req-42")
    );
}

#[tokio::test]
async fn expired_token_maps_to_unauthorized_with_api_message() {
    let api = common::spawn_fake_school(FakeSchool::default()).await;

    let err = api
        .teacher_subjects(&Caller::with_token("expired"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Unauthorized);
    assert_eq!(err.message, "Token expired");
}

#[tokio::test]
async fn server_error_maps_to_upstream() {
    let fake = FakeSchool::default().with_subjects(StatusCode::INTERNAL_SERVER_ERROR, "boom");
    let api = common::spawn_fake_school(fake).await;

    let err = api.teacher_subjects(&teacher()).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Upstream);
    assert_eq!(
        err.message,
        "The school service is unavailable. Please try again later."
    );
}

#[tokio::test]
async fn join_permission_sends_camel_case_body() {
    let fake = FakeSchool::default();
    let api = common::spawn_fake_school(fake.clone()).await;

    api.set_join_permission(&teacher(), "s1", true).await.unwrap();
    api.set_join_permission(&teacher(), "s2", false).await.unwrap();

    assert_eq!(
        *fake.join_updates.lock().unwrap(),
        vec![("s1".to_string(), true), ("s2".to_string(), false)]
    );
}

#[tokio::test]
async fn join_permission_on_unknown_subject_is_not_found() {
    let fake = FakeSchool::default();
    let api = common::spawn_fake_school(fake.clone()).await;

    let err = api
        .set_join_permission(&teacher(), "missing", true)
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::NotFound);
    assert_eq!(err.message, "Subject not found");
    assert!(fake.join_updates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn logout_reaches_the_api() {
    let fake = FakeSchool::default();
    let api = common::spawn_fake_school(fake.clone()).await;

    api.logout(&teacher()).await.unwrap();
    assert_eq!(*fake.logouts.lock().unwrap(), 1);
}

#[tokio::test]
async fn unreachable_api_is_upstream() {
    // Port 9 (discard) on localhost is closed in test environments.
    let api = SchoolApi::new("http://127.0.0.1:9/api", Duration::from_secs(2));

    let err = api.teacher_classes(&teacher()).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Upstream);
}
