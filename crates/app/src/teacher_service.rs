use dioxus::prelude::ServerFnError;
use shared_types::AppError;

/// Teacher-facing operations of the school API, as seen from the client.
///
/// List calls return the raw response body; callers decode it so a body of
/// the wrong shape can be told apart from an empty list.
pub trait TeacherService {
    async fn classes(&self) -> Result<String, AppError>;
    async fn subjects(&self) -> Result<String, AppError>;
    async fn set_join_permission(&self, subject_id: &str, allow: bool) -> Result<(), AppError>;
}

/// Production implementation over the BFF server functions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ServerTeacherService;

impl TeacherService for ServerTeacherService {
    async fn classes(&self) -> Result<String, AppError> {
        server::api::get_teacher_classes()
            .await
            .map_err(server_fn_to_app_error)
    }

    async fn subjects(&self) -> Result<String, AppError> {
        server::api::get_teacher_subjects()
            .await
            .map_err(server_fn_to_app_error)
    }

    async fn set_join_permission(&self, subject_id: &str, allow: bool) -> Result<(), AppError> {
        server::api::toggle_subject_join_permission(subject_id.to_string(), allow)
            .await
            .map_err(server_fn_to_app_error)
    }
}

/// Recover the structured error a server function sent, or wrap whatever
/// the transport reported.
pub fn server_fn_to_app_error(err: ServerFnError) -> AppError {
    let text = err.to_string();
    AppError::from_server_error(&text)
        .unwrap_or_else(|| AppError::upstream(AppError::friendly_message(&text)))
}
