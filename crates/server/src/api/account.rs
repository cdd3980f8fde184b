use dioxus::prelude::*;
use shared_types::User;

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};

#[cfg(feature = "server")]
use super::auth::*;

/// Login with email and password. Stores the API token in an HTTP-only
/// cookie and returns the signed-in user.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn login(email: String, password: String) -> Result<User, ServerFnError> {
    use crate::auth::cookies;
    use crate::school_api::school_api;
    use shared_types::LoginRequest;

    let req = LoginRequest {
        email: email.trim().to_string(),
        password,
    };
    req.validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    let auth = school_api()
        .login(&req, &current_caller())
        .await
        .map_err(|e| e.into_server_fn_error())?;

    cookies::schedule_session_cookie(&auth.access_token);
    tracing::info!(user_id = %auth.user.id, role = %auth.user.role, "user signed in");

    Ok(auth.user)
}

/// Get the current authenticated user. Returns None if not authenticated.
///
/// A token the school API no longer accepts resolves to None and the
/// stale cookie is cleared.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_current_user() -> Result<Option<User>, ServerFnError> {
    use crate::auth::cookies;
    use crate::school_api::school_api;

    let caller = current_caller();
    if caller.token.is_none() {
        return Ok(None);
    }

    match school_api().me(&caller).await {
        Ok(Some(user)) => Ok(Some(user)),
        Ok(None) => {
            tracing::info!("session token rejected by school API, clearing cookie");
            cookies::schedule_clear_cookie();
            Ok(None)
        }
        Err(e) => Err(e.into_server_fn_error()),
    }
}

/// Logout: tell the school API to revoke the token, then clear the cookie.
///
/// The cookie is cleared even if the API call fails.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn logout() -> Result<(), ServerFnError> {
    use crate::auth::cookies;
    use crate::school_api::school_api;

    let caller = current_caller();
    if caller.token.is_some() {
        if let Err(e) = school_api().logout(&caller).await {
            tracing::warn!(error = %e, "school API logout failed, clearing cookie anyway");
        }
    }

    cookies::schedule_clear_cookie();
    Ok(())
}
