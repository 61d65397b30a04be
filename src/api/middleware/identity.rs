//! Cookie-based caller identity middleware.

use axum::{
    extract::{Request, State},
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
    },
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::state::AppState;

pub const PERSON_COOKIE: &str = "person";
pub const TOKEN_COOKIE: &str = "token";

/// Person id of the caller, inserted as a request extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person(pub String);

impl Person {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Binds every request to a person id.
///
/// # Cookie Format
///
/// ```text
/// Cookie: person=<uuid>; token=<16 hex chars>
/// ```
///
/// A pair whose token verifies is trusted as is. A missing or forged pair is
/// replaced by a freshly issued identity, and the new cookies are appended to
/// the response.
///
/// # Cookie Parsing
///
/// Handles multiple cookies in the `Cookie` header, including several
/// `Cookie` headers, and ignores unrelated cookies.
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let person = read_cookie(req.headers(), PERSON_COOKIE);
    let token = read_cookie(req.headers(), TOKEN_COOKIE);

    let verified = match (person, token) {
        (Some(person), Some(token)) if st.identity.verify(&person, &token) => Some(person),
        _ => None,
    };

    let Some(person) = verified else {
        let identity = st.identity.issue();
        debug!(person = %identity.person, "Issued new identity");

        req.extensions_mut().insert(Person(identity.person.clone()));
        let mut response = next.run(req).await;

        for (name, value) in [
            (PERSON_COOKIE, identity.person),
            (TOKEN_COOKIE, identity.token),
        ] {
            let cookie = format!("{name}={value}; Path=/; HttpOnly");
            if let Ok(cookie) = HeaderValue::from_str(&cookie) {
                response.headers_mut().append(SET_COOKIE, cookie);
            }
        }

        return response;
    };

    req.extensions_mut().insert(Person(person));
    next.run(req).await
}

/// Value of cookie `name` across all `Cookie` headers.
fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|cookie_header| cookie_header.to_str().ok())
        .flat_map(|cookie_str| cookie_str.split(';'))
        .find_map(|cookie| {
            let mut parts = cookie.trim().splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(key), Some(value)) if key == name && !value.is_empty() => {
                    Some(value.to_string())
                }
                _ => None,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookies: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for cookie in cookies {
            headers.append(COOKIE, HeaderValue::from_str(cookie).unwrap());
        }
        headers
    }

    #[test]
    fn test_read_cookie_among_others() {
        let headers = headers(&["theme=dark; person=abc; token=0123"]);

        assert_eq!(read_cookie(&headers, "person").as_deref(), Some("abc"));
        assert_eq!(read_cookie(&headers, "token").as_deref(), Some("0123"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_read_cookie_across_headers() {
        let headers = headers(&["person=abc", "token=0123"]);

        assert_eq!(read_cookie(&headers, "token").as_deref(), Some("0123"));
    }

    #[test]
    fn test_read_cookie_ignores_empty_values() {
        let headers = headers(&["person=; token=0123"]);

        assert_eq!(read_cookie(&headers, "person"), None);
    }
}
