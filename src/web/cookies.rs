//! Cookie header helpers

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};

use crate::error::{Error, Result};

/// Value of the named cookie from the request's `Cookie` headers
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| cookie.trim().strip_prefix(prefix.as_str()))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// `Set-Cookie` value for an HttpOnly cookie scoped to the whole site
pub fn set_cookie(name: &str, value: &str, max_age_secs: i64, secure: bool) -> Result<HeaderValue> {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        name, value, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).map_err(|e| Error::Other(format!("Invalid cookie: {}", e)))
}

/// `Set-Cookie` value that removes the named cookie
pub fn clear_cookie(name: &str) -> HeaderValue {
    let cookie = format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", name);
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static("invalid=; Max-Age=0"))
}
