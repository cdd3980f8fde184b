//! HTTP client for the external school API.
//!
//! Every call carries the caller's API token (as a Bearer header) and the
//! inbound request id so the API's logs line up with ours. Non-2xx answers
//! become [`AppError`]s via [`AppError::from_status`], using the API's own
//! `message` when it sent one.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use shared_types::{AppError, AuthResponse, BackendConfig, JoinPermissionRequest, LoginRequest, User};
use std::sync::OnceLock;
use std::time::Duration;

use crate::config::backend_config;
use crate::error_convert::ReqwestErrorExt;

/// Header used to correlate a BFF request with the API calls it makes.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const LOGIN_PATH: &str = "/auth/login";
const ME_PATH: &str = "/auth/me";
const LOGOUT_PATH: &str = "/auth/logout";
const TEACHER_CLASSES_PATH: &str = "/teachers/me/classes";
const TEACHER_SUBJECTS_PATH: &str = "/teachers/me/subjects";

static SCHOOL_API: OnceLock<SchoolApi> = OnceLock::new();

/// Process-wide client, built from the loaded backend config on first use.
pub fn school_api() -> &'static SchoolApi {
    SCHOOL_API.get_or_init(|| SchoolApi::from_config(backend_config()))
}

/// Who is calling, as far as the school API needs to know.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Caller {
    pub token: Option<String>,
    pub request_id: Option<String>,
}

impl Caller {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            request_id: None,
        }
    }
}

/// `/auth/me` answers either with the user itself or wrapped in `{ "user": .. }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum UserEnvelope {
    Wrapped { user: User },
    Bare(User),
}

impl From<UserEnvelope> for User {
    fn from(envelope: UserEnvelope) -> Self {
        match envelope {
            UserEnvelope::Wrapped { user } | UserEnvelope::Bare(user) => user,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SchoolApi {
    client: reqwest::Client,
    base_url: String,
}

impl SchoolApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::error!(%e, "failed to build school API client, using defaults");
                reqwest::Client::new()
            });
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str, caller: &Caller) -> RequestBuilder {
        let mut builder = self.client.request(method, self.url(path));
        if let Some(token) = &caller.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(id) = &caller.request_id {
            builder = builder.header(REQUEST_ID_HEADER, id);
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, AppError> {
        let response = builder.send().await.map_err(|e| {
            let err = e.into_app_error();
            tracing::warn!(error = %err, "school API request failed");
            err
        })?;
        ensure_success(response).await
    }

    /// Exchange credentials for an API token and the signed-in user.
    #[tracing::instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(
        &self,
        credentials: &LoginRequest,
        caller: &Caller,
    ) -> Result<AuthResponse, AppError> {
        let response = self
            .request(Method::POST, LOGIN_PATH, caller)
            .json(credentials)
            .send()
            .await
            .map_err(|e| e.into_app_error())?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(AppError::unauthorized("Invalid email or password"));
        }
        let response = ensure_success(response).await?;
        decode_json::<AuthResponse>(response).await
    }

    /// Resolve the token's user. `Ok(None)` when the API says the token is
    /// missing, expired or revoked.
    #[tracing::instrument(skip(self, caller))]
    pub async fn me(&self, caller: &Caller) -> Result<Option<User>, AppError> {
        if caller.token.is_none() {
            return Ok(None);
        }
        let response = self
            .request(Method::GET, ME_PATH, caller)
            .send()
            .await
            .map_err(|e| e.into_app_error())?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        let response = ensure_success(response).await?;
        let envelope = decode_json::<UserEnvelope>(response).await?;
        Ok(Some(envelope.into()))
    }

    #[tracing::instrument(skip(self, caller))]
    pub async fn logout(&self, caller: &Caller) -> Result<(), AppError> {
        self.send(self.request(Method::POST, LOGOUT_PATH, caller))
            .await
            .map(|_| ())
    }

    /// Raw body of the caller's managed classes. Decoding happens on the client.
    #[tracing::instrument(skip(self, caller))]
    pub async fn teacher_classes(&self, caller: &Caller) -> Result<String, AppError> {
        let response = self
            .send(self.request(Method::GET, TEACHER_CLASSES_PATH, caller))
            .await?;
        response.text().await.map_err(|e| e.into_app_error())
    }

    /// Raw body of the caller's assigned subjects.
    #[tracing::instrument(skip(self, caller))]
    pub async fn teacher_subjects(&self, caller: &Caller) -> Result<String, AppError> {
        let response = self
            .send(self.request(Method::GET, TEACHER_SUBJECTS_PATH, caller))
            .await?;
        response.text().await.map_err(|e| e.into_app_error())
    }

    /// Open or close a subject for student self-enrolment.
    #[tracing::instrument(skip(self, caller))]
    pub async fn set_join_permission(
        &self,
        caller: &Caller,
        subject_id: &str,
        allow: bool,
    ) -> Result<(), AppError> {
        let path = format!("/subjects/{subject_id}/join-permission");
        let body = JoinPermissionRequest {
            allow_student_addition: allow,
        };
        self.send(self.request(Method::PATCH, &path, caller).json(&body))
            .await
            .map(|_| ())
    }
}

async fn ensure_success(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = extract_message(&body).unwrap_or_else(|| default_message(status).to_string());
    tracing::warn!(status = status.as_u16(), %message, "school API rejected request");
    Err(AppError::from_status(status.as_u16(), message))
}

async fn decode_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let body = response.text().await.map_err(|e| e.into_app_error())?;
    serde_json::from_str(&body).map_err(|e| {
        tracing::warn!(%e, "school API sent an unexpected body");
        AppError::malformed("The school service sent an unexpected response")
    })
}

/// Pull a human-readable message out of an API error body.
///
/// Accepts `{"message": "..."}`, `{"message": ["...", "..."]}` and
/// `{"error": "..."}`.
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value.get("message").or_else(|| value.get("error"))?;
    let text = match message {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join("; "),
        _ => return None,
    };
    (!text.trim().is_empty()).then_some(text)
}

fn default_message(status: StatusCode) -> &'static str {
    match status.as_u16() {
        401 => "Your session has expired. Please sign in again.",
        403 => "You do not have permission to do that.",
        404 => "The requested record was not found.",
        400..=499 => "The request was rejected.",
        _ => "The school service is unavailable. Please try again later.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_from_string_body() {
        assert_eq!(
            extract_message(r#"{"message":"Subject not found"}"#).as_deref(),
            Some("Subject not found")
        );
    }

    #[test]
    fn message_from_array_body() {
        assert_eq!(
            extract_message(r#"{"message":["email must be an email","password is short"]}"#)
                .as_deref(),
            Some("email must be an email; password is short")
        );
    }

    #[test]
    fn message_from_error_field() {
        assert_eq!(
            extract_message(r#"{"error":"Forbidden"}"#).as_deref(),
            Some("Forbidden")
        );
    }

    #[test]
    fn no_message_for_html_or_blank() {
        assert_eq!(extract_message("<html>Bad Gateway</html>"), None);
        assert_eq!(extract_message(r#"{"message":"  "}"#), None);
        assert_eq!(extract_message(r#"{"message":42}"#), None);
    }

    #[test]
    fn default_messages_by_status() {
        assert_eq!(
            default_message(StatusCode::UNAUTHORIZED),
            "Your session has expired. Please sign in again."
        );
        assert_eq!(
            default_message(StatusCode::CONFLICT),
            "The request was rejected."
        );
        assert_eq!(
            default_message(StatusCode::BAD_GATEWAY),
            "The school service is unavailable. Please try again later."
        );
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let api = SchoolApi::new("http://api.test/v1/", Duration::from_secs(1));
        assert_eq!(api.base_url(), "http://api.test/v1");
        assert_eq!(api.url(ME_PATH), "http://api.test/v1/auth/me");
    }

    #[test]
    fn me_envelope_accepts_wrapped_and_bare() {
        let bare = r#"{"_id":"u1","firstName":"Ada","lastName":"Obi","email":"a@s.test","role":"teacher"}"#;
        let wrapped = format!(r#"{{"user":{bare}}}"#);
        let a: User = serde_json::from_str::<UserEnvelope>(bare).unwrap().into();
        let b: User = serde_json::from_str::<UserEnvelope>(&wrapped).unwrap().into();
        assert_eq!(a, b);
        assert_eq!(a.id, "u1");
    }
}
