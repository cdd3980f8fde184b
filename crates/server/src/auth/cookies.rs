use axum::http::{header, HeaderMap, HeaderValue};
use cookie::Cookie;
use std::sync::{Arc, Mutex};

/// HTTP-only cookie carrying the school API token.
pub const SESSION_COOKIE: &str = "school_session";

/// Lifetime of the session cookie. The API may expire the token sooner,
/// in which case `/auth/me` answers 401 and the session resolves anonymous.
pub const SESSION_MAX_AGE_HOURS: i64 = 12;

fn cookie_secure() -> bool {
    std::env::var("COOKIE_SECURE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}

fn cookie_domain() -> Option<String> {
    std::env::var("COOKIE_DOMAIN")
        .ok()
        .filter(|d| !d.is_empty())
}

/// Build a Set-Cookie header value holding the API token.
///
/// Returns `None` if the token contains bytes that cannot appear in a header.
pub fn build_session_cookie(token: &str) -> Option<HeaderValue> {
    let mut cookie = Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::hours(SESSION_MAX_AGE_HOURS))
        .secure(cookie_secure());

    if let Some(domain) = cookie_domain() {
        cookie = cookie.domain(domain);
    }

    HeaderValue::from_str(&cookie.build().to_string()).ok()
}

/// Build a Set-Cookie header value that expires the session cookie.
pub fn build_clear_cookie() -> HeaderValue {
    let mut cookie = Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::ZERO);

    if let Some(domain) = cookie_domain() {
        cookie = cookie.domain(domain);
    }

    HeaderValue::from_str(&cookie.build().to_string())
        .unwrap_or_else(|_| HeaderValue::from_static("school_session=; Path=/; Max-Age=0"))
}

/// Extract the API token from the session cookie (preferred) or a Bearer
/// header (native clients that do not keep cookies).
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_cookie(headers, SESSION_COOKIE) {
        return Some(token);
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Parse a specific cookie value from the Cookie header.
fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    for header_value in headers.get_all(header::COOKIE) {
        if let Ok(cookie_str) = header_value.to_str() {
            for piece in cookie_str.split(';') {
                if let Ok(c) = Cookie::parse(piece.trim().to_string()) {
                    if c.name() == name && !c.value().is_empty() {
                        return Some(c.value().to_string());
                    }
                }
            }
        }
    }
    None
}

/// Cookie change requested by a server function, applied by the middleware
/// once the handler has produced its response.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingCookieAction {
    Set { token: String },
    Clear,
}

/// Shared slot for server functions to communicate cookie actions to the middleware.
#[derive(Clone, Debug, Default)]
pub struct CookieSlot(pub Arc<Mutex<Option<PendingCookieAction>>>);

impl CookieSlot {
    pub fn schedule(&self, action: PendingCookieAction) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(action);
        }
    }

    pub fn take(&self) -> Option<PendingCookieAction> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

fn schedule(action: PendingCookieAction) {
    let Some(ctx) = dioxus::fullstack::FullstackContext::current() else {
        tracing::warn!("no request context, cookie change dropped");
        return;
    };
    let parts = ctx.parts_mut();
    match parts.extensions.get::<CookieSlot>() {
        Some(slot) => slot.schedule(action),
        None => tracing::warn!("session cookie middleware not installed, cookie change dropped"),
    }
}

/// Schedule the session cookie to be set by the middleware.
pub fn schedule_session_cookie(token: &str) {
    schedule(PendingCookieAction::Set {
        token: token.to_string(),
    });
}

/// Schedule the session cookie to be cleared by the middleware.
pub fn schedule_clear_cookie() {
    schedule(PendingCookieAction::Clear);
}
