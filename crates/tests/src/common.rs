use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::{json, Value};
use server::school_api::SchoolApi;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TEACHER_EMAIL: &str = "ada@school.test";
pub const TEACHER_PASSWORD: &str = "secret";
pub const TEACHER_TOKEN: &str = "tok-teacher";

/// Canned behaviour and recorded calls of the fake school API.
#[derive(Clone)]
pub struct FakeSchool {
    pub classes_body: Arc<Mutex<String>>,
    pub subjects_body: Arc<Mutex<String>>,
    pub subjects_status: Arc<Mutex<StatusCode>>,
    /// `(subject_id, allowStudentAddition)` for every accepted PATCH.
    pub join_updates: Arc<Mutex<Vec<(String, bool)>>>,
    /// `x-request-id` of the last request that carried one.
    pub last_request_id: Arc<Mutex<Option<String>>>,
    pub logouts: Arc<Mutex<u32>>,
}

impl Default for FakeSchool {
    fn default() -> Self {
        Self {
            classes_body: Arc::new(Mutex::new("[]".to_string())),
            subjects_body: Arc::new(Mutex::new("[]".to_string())),
            subjects_status: Arc::new(Mutex::new(StatusCode::OK)),
            join_updates: Arc::default(),
            last_request_id: Arc::default(),
            logouts: Arc::default(),
        }
    }
}

impl FakeSchool {
    pub fn with_classes(self, body: &str) -> Self {
        *self.classes_body.lock().unwrap() = body.to_string();
        self
    }

    pub fn with_subjects(self, status: StatusCode, body: &str) -> Self {
        *self.subjects_status.lock().unwrap() = status;
        *self.subjects_body.lock().unwrap() = body.to_string();
        self
    }

    fn record(&self, headers: &HeaderMap) {
        if let Some(id) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
            *self.last_request_id.lock().unwrap() = Some(id.to_string());
        }
    }
}

pub fn teacher_json() -> Value {
    json!({
        "_id": "u-1",
        "firstName": "Ada",
        "lastName": "Obi",
        "email": TEACHER_EMAIL,
        "role": "teacher"
    })
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {TEACHER_TOKEN}"))
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Token expired" })),
    )
        .into_response()
}

async fn login(State(fake): State<FakeSchool>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    fake.record(&headers);
    if body["email"] == TEACHER_EMAIL && body["password"] == TEACHER_PASSWORD {
        Json(json!({ "token": TEACHER_TOKEN, "user": teacher_json() })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
            .into_response()
    }
}

async fn me(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({ "user": teacher_json() })).into_response()
}

async fn logout(State(fake): State<FakeSchool>) -> StatusCode {
    *fake.logouts.lock().unwrap() += 1;
    StatusCode::NO_CONTENT
}

async fn classes(State(fake): State<FakeSchool>, headers: HeaderMap) -> Response {
    fake.record(&headers);
    if !authorized(&headers) {
        return unauthorized();
    }
    let body = fake.classes_body.lock().unwrap().clone();
    ([("content-type", "application/json")], body).into_response()
}

async fn subjects(State(fake): State<FakeSchool>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let status = *fake.subjects_status.lock().unwrap();
    let body = fake.subjects_body.lock().unwrap().clone();
    (status, body).into_response()
}

async fn join_permission(
    State(fake): State<FakeSchool>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if id == "missing" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Subject not found" })),
        )
            .into_response();
    }
    let Some(allow) = body["allowStudentAddition"].as_bool() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": ["allowStudentAddition must be a boolean"] })),
        )
            .into_response();
    };
    fake.join_updates.lock().unwrap().push((id.clone(), allow));
    Json(json!({ "_id": id, "allowStudentAddition": allow })).into_response()
}

/// Serve the fake school API on an ephemeral port and return a client for it.
pub async fn spawn_fake_school(fake: FakeSchool) -> SchoolApi {
    let router = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/auth/logout", post(logout))
        .route("/api/teachers/me/classes", get(classes))
        .route("/api/teachers/me/subjects", get(subjects))
        .route("/api/subjects/{id}/join-permission", patch(join_permission))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("fake school API");
    });

    SchoolApi::new(format!("http://{addr}/api/"), Duration::from_secs(5))
}
