// Server-only helpers shared by the api/* server functions.

use dioxus::prelude::*;
use shared_types::AppError;

use crate::auth::cookies;
use crate::error_convert::AppErrorExt;
use crate::school_api::{Caller, REQUEST_ID_HEADER};

/// Identify the caller of the current server function: the API token from
/// the session cookie (or Bearer header) and the inbound request id.
///
/// Outside a request context the caller is anonymous.
pub(crate) fn current_caller() -> Caller {
    let Some(ctx) = dioxus::fullstack::FullstackContext::current() else {
        return Caller::default();
    };
    let headers = ctx.parts_mut().headers.clone();

    Caller {
        token: cookies::extract_session_token(&headers),
        request_id: headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    }
}

/// Like [`current_caller`] but fails with `Unauthorized` when no token is present.
pub(crate) fn require_caller() -> Result<Caller, ServerFnError> {
    let caller = current_caller();
    if caller.token.is_none() {
        return Err(AppError::unauthorized("Authentication required").into_server_fn_error());
    }
    Ok(caller)
}

/// Map a school API error to a server function error. A 401 also clears
/// the stale session cookie so the client stops presenting it.
pub(crate) fn forward_error(err: AppError) -> ServerFnError {
    if err.kind == shared_types::AppErrorKind::Unauthorized {
        cookies::schedule_clear_cookie();
    }
    err.into_server_fn_error()
}
