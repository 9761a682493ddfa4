//! Session cookies
//!
//! The API refresh token and the Google refresh token never reach scripts:
//! both travel in `HttpOnly; Secure; SameSite=None` cookies scoped to `/`.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const REFRESH_COOKIE: &str = "refresh";
pub const GOOGLE_TOKEN_COOKIE: &str = "google_token";

fn session_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/")
        .build()
}

/// Value of a cookie, if present and non-empty
pub fn read(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// Store a rotated refresh token and, when Google issued one, its refresh token
pub fn store_session(jar: CookieJar, refresh_token: String, google_refresh_token: Option<String>) -> CookieJar {
    let jar = jar.add(session_cookie(REFRESH_COOKIE, refresh_token));
    match google_refresh_token {
        Some(token) => jar.add(session_cookie(GOOGLE_TOKEN_COOKIE, token)),
        None => jar,
    }
}

/// Expire both session cookies
pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(REFRESH_COOKIE).path("/"))
        .remove(Cookie::build(GOOGLE_TOKEN_COOKIE).path("/"))
}
