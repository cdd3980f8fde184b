use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware,
    routing::get,
    Extension, Router,
};
use server::auth::cookies::{CookieSlot, PendingCookieAction};
use server::auth::middleware::session_cookie_middleware;
use tower::ServiceExt;

async fn set_session(Extension(slot): Extension<CookieSlot>) -> &'static str {
    slot.schedule(PendingCookieAction::Set {
        token: "tok-teacher".into(),
    });
    "signed in"
}

async fn clear_session(Extension(slot): Extension<CookieSlot>) -> &'static str {
    slot.schedule(PendingCookieAction::Clear);
    "signed out"
}

async fn untouched() -> &'static str {
    "ok"
}

fn app() -> Router {
    Router::new()
        .route("/set", get(set_session))
        .route("/clear", get(clear_session))
        .route("/noop", get(untouched))
        .layer(middleware::from_fn(session_cookie_middleware))
}

async fn set_cookie_header(path: &str) -> (StatusCode, Option<String>) {
    let response = app()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string());
    (response.status(), cookie)
}

#[tokio::test]
async fn scheduled_token_becomes_http_only_cookie() {
    let (status, cookie) = set_cookie_header("/set").await;
    assert_eq!(status, StatusCode::OK);
    let cookie = cookie.expect("Set-Cookie header");
    assert!(cookie.starts_with("school_session=tok-teacher"));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn scheduled_clear_expires_cookie() {
    let (_, cookie) = set_cookie_header("/clear").await;
    let cookie = cookie.expect("Set-Cookie header");
    assert!(cookie.starts_with("school_session="));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn nothing_scheduled_leaves_response_alone() {
    let (status, cookie) = set_cookie_header("/noop").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cookie, None);
}
