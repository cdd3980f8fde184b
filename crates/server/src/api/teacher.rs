use dioxus::prelude::*;

#[cfg(feature = "server")]
use super::auth::*;

// ── Teacher Server Functions ───────────────────────────
//
// List endpoints hand back the school API's body untouched. The client
// decodes it, so a body of the wrong shape is reported as a load failure
// on the page that asked for it.

/// Classes the signed-in teacher manages, as the raw JSON body.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_teacher_classes() -> Result<String, ServerFnError> {
    use crate::school_api::school_api;

    let caller = require_caller()?;
    school_api()
        .teacher_classes(&caller)
        .await
        .map_err(forward_error)
}

/// Subjects assigned to the signed-in teacher, as the raw JSON body.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_teacher_subjects() -> Result<String, ServerFnError> {
    use crate::school_api::school_api;

    let caller = require_caller()?;
    school_api()
        .teacher_subjects(&caller)
        .await
        .map_err(forward_error)
}

/// Allow or stop students adding themselves to a subject.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn toggle_subject_join_permission(
    subject_id: String,
    new_value: bool,
) -> Result<(), ServerFnError> {
    use crate::error_convert::AppErrorExt;
    use crate::school_api::school_api;
    use shared_types::AppError;

    let subject_id = subject_id.trim().to_string();
    if subject_id.is_empty() || subject_id.contains('/') {
        return Err(AppError::bad_request("Invalid subject id").into_server_fn_error());
    }

    let caller = require_caller()?;
    school_api()
        .set_join_permission(&caller, &subject_id, new_value)
        .await
        .map_err(forward_error)?;

    tracing::info!(%subject_id, allow = new_value, "join permission updated");
    Ok(())
}
