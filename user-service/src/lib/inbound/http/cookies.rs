use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;

use crate::config::CookieConfig;

/// Name of the cookie carrying the signed token.
pub const AUTH_COOKIE: &str = "auth_token";

/// Cookie handing a freshly issued token to the client.
///
/// The cookie may outlive the token; the token's own expiry governs validity.
pub fn session_cookie(token: String, config: &CookieConfig) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .path("/")
        .max_age(time::Duration::hours(config.max_age_hours))
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie instructing the client to drop its token immediately.
pub fn expired_session_cookie(config: &CookieConfig) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .build()
}
