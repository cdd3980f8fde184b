use axum::extract::Request;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use super::cookies::{self, CookieSlot, PendingCookieAction};

/// Session cookie middleware for the BFF.
///
/// Inserts a `CookieSlot` into the request so server functions can
/// schedule a cookie change, then applies whatever was scheduled to the
/// response. It never rejects requests; server functions decide what an
/// anonymous caller may do.
pub async fn session_cookie_middleware(mut req: Request, next: Next) -> Response {
    let cookie_slot = CookieSlot::default();
    req.extensions_mut().insert(cookie_slot.clone());

    let mut response = next.run(req).await;

    match cookie_slot.take() {
        Some(PendingCookieAction::Set { token }) => match cookies::build_session_cookie(&token) {
            Some(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            None => tracing::error!("API token is not a valid cookie value, session not stored"),
        },
        Some(PendingCookieAction::Clear) => {
            response
                .headers_mut()
                .append(header::SET_COOKIE, cookies::build_clear_cookie());
        }
        None => {}
    }

    response
}
