/// Renewal-token cookie handling
///
/// The renewal token travels exclusively in an http-only cookie named
/// `refreshToken`, so browser scripts can never read it. This module builds
/// the `Set-Cookie` header values and extracts the token from incoming
/// `Cookie` headers.
///
/// # Cookie Attributes
///
/// - `HttpOnly`: not readable from JavaScript
/// - `SameSite=Strict`: never sent on cross-site requests
/// - `Path=/`: valid for the whole API
/// - `Max-Age`: 7 days (matches the renewal token lifetime)
/// - `Secure`: added when the server runs in production mode
use axum::http::header::COOKIE;
use axum::http::HeaderMap;

use super::jwt::Claims;

/// Name of the cookie carrying the renewal token
pub const RENEWAL_COOKIE: &str = "refreshToken";

/// Builds the `Set-Cookie` value that stores a renewal token
///
/// # Arguments
///
/// * `token` - The renewal token (a JWT, so it never needs escaping)
/// * `secure` - Whether to add the `Secure` attribute (production mode)
pub fn build_renewal_cookie(token: &str, secure: bool) -> String {
    let max_age = Claims::renewal_expiration().num_seconds();
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        RENEWAL_COOKIE, token, max_age
    );

    if secure {
        cookie.push_str("; Secure");
    }

    cookie
}

/// Builds the `Set-Cookie` value that removes the renewal cookie
///
/// `Max-Age=0` instructs the browser to drop the cookie immediately.
pub fn clear_renewal_cookie() -> String {
    format!(
        "{}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0",
        RENEWAL_COOKIE
    )
}

/// Extracts a cookie value from the request's `Cookie` header(s)
///
/// Handles both the usual single `Cookie: a=1; b=2` header and the
/// (legal but rare) case of multiple `Cookie` headers.
///
/// # Returns
///
/// The cookie value if present, `None` otherwise
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split("; "))
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}
