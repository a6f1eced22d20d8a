// ABOUTME: Issues and clears the admin session cookie.
// ABOUTME: The cookie carries the authenticator's session value and is accepted as a standing credential.

use axum_extra::extract::cookie::{Cookie, SameSite};
use hydraweb_core::Authenticator;
use time::Duration;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "admin_session";

/// Lifetime of an issued session cookie.
pub const SESSION_MAX_AGE: Duration = Duration::days(30);

/// Build the cookie set after a successful login.
pub fn issue(authenticator: &dyn Authenticator) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, authenticator.session_value()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(SESSION_MAX_AGE)
        .build()
}

/// Build the already-expired cookie that deletes the session on the client.
pub fn clear() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .secure(true)
        .max_age(Duration::ZERO)
        .build()
}
