//! `session` cookie formatting and parsing.

use axum::http::{header, HeaderMap, HeaderValue};
use chrono::{DateTime, Utc};

use super::IssuedSession;

const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Build the `Set-Cookie` value carrying a freshly issued session.
///
/// `Expires` is taken from the session itself so the cookie and the token
/// expire at the same instant.
pub fn session_cookie(name: &str, issued: &IssuedSession) -> Option<HeaderValue> {
    let value = format!(
        "{}={}; Path=/; Expires={}; HttpOnly; Secure; SameSite=Lax",
        name,
        issued.token,
        http_date(issued.session.expires_at)
    );
    HeaderValue::from_str(&value).ok()
}

/// `Set-Cookie` value that makes the browser drop the session cookie.
pub fn clear_session_cookie(name: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{}=; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=0; HttpOnly; Secure; SameSite=Lax",
        name
    ))
    .ok()
}

/// Find the value of cookie `name` in the request's `Cookie` headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
        .filter(|value| !value.is_empty())
}

/// Parse the `Expires` attribute out of a `Set-Cookie` value.
pub fn cookie_expires(set_cookie: &str) -> Option<DateTime<Utc>> {
    let raw = set_cookie
        .split(';')
        .filter_map(|attr| attr.trim().split_once('='))
        .find(|(key, _)| key.eq_ignore_ascii_case("expires"))
        .map(|(_, value)| value)?;

    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn http_date(at: DateTime<Utc>) -> String {
    at.format(HTTP_DATE).to_string()
}
