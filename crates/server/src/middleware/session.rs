//! Session cookie handling.
//!
//! The session token travels in a single `session` cookie. The cookie is
//! `HttpOnly` and `SameSite=Strict`; `Secure` is added when the server is
//! reached over HTTPS. The cookie's `Max-Age` matches the server-side
//! session TTL, and sign-out clears it with `Max-Age=0`.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;

use crate::db::SESSION_TTL;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";

/// Build the `Set-Cookie` value that installs a session token.
#[must_use]
pub fn build_session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; HttpOnly; Path=/; SameSite=Strict; Max-Age={}",
        SESSION_TTL.num_seconds()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build the `Set-Cookie` value that clears the session cookie.
#[must_use]
pub fn clear_session_cookie(secure: bool) -> String {
    let mut cookie =
        format!("{SESSION_COOKIE_NAME}=; HttpOnly; Path=/; SameSite=Strict; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Pull the session token out of the request's `Cookie` headers, if present.
#[must_use]
pub fn parse_session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (name, token) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE_NAME).then(|| token.to_string())
        })
        .next()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_build_session_cookie() {
        assert_eq!(
            build_session_cookie("abc123", false),
            "session=abc123; HttpOnly; Path=/; SameSite=Strict; Max-Age=604800"
        );
        assert_eq!(
            build_session_cookie("abc123", true),
            "session=abc123; HttpOnly; Path=/; SameSite=Strict; Max-Age=604800; Secure"
        );
    }

    #[test]
    fn test_clear_session_cookie() {
        assert_eq!(
            clear_session_cookie(false),
            "session=; HttpOnly; Path=/; SameSite=Strict; Max-Age=0"
        );
        assert!(clear_session_cookie(true).ends_with("; Secure"));
    }

    #[test]
    fn test_parse_session_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; session=tok_42; lang=en"),
        );
        assert_eq!(parse_session_cookie(&headers), Some("tok_42".to_string()));
    }

    #[test]
    fn test_parse_session_cookie_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(parse_session_cookie(&headers), None);
        assert_eq!(parse_session_cookie(&HeaderMap::new()), None);
    }
}
