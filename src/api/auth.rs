//! Request principal extraction.
//!
//! Identity arrives in headers set by an upstream gateway: `X-User-Id`,
//! `X-User-Role` and optionally `X-Forwarded-For`.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{Principal, Role};

use super::response::ApiErrorResponse;

/// Header carrying the authenticated account id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the account role.
pub const USER_ROLE_HEADER: &str = "x-user-role";
/// Header carrying the client address chain.
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// The principal of the current request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Principal);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match principal_from_headers(&parts.headers) {
            Ok(principal) => Ok(AuthenticatedUser(principal)),
            Err(error) => {
                warn!(uri = %parts.uri, error = %error, "request rejected: no principal");
                Err(error.into())
            }
        }
    }
}

/// Builds a [`Principal`] from request headers.
///
/// The user id must be a positive integer and the role one of the known
/// roles; the client address is the first entry of `X-Forwarded-For`.
pub fn principal_from_headers(headers: &HeaderMap) -> EngineResult<Principal> {
    let user_id = header_str(headers, USER_ID_HEADER)
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| unauthorized("user not authenticated"))?;

    let role = header_str(headers, USER_ROLE_HEADER)
        .and_then(Role::parse)
        .ok_or_else(|| unauthorized("unknown user role"))?;

    let principal = Principal::new(user_id, role);
    let forwarded = header_str(headers, FORWARDED_FOR_HEADER)
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    Ok(match forwarded {
        Some(ip) => principal.with_ip_address(ip),
        None => principal,
    })
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn unauthorized(message: &str) -> EngineError {
    EngineError::Unauthorized {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_principal_from_headers() {
        let principal = principal_from_headers(&headers(&[
            ("x-user-id", "7"),
            ("x-user-role", "admin"),
            ("x-forwarded-for", "203.0.113.9, 10.0.0.1"),
        ]))
        .unwrap();
        assert_eq!(principal.user_id, 7);
        assert!(principal.is_admin());
        assert_eq!(principal.ip_address.as_deref(), Some("203.0.113.9"));
    }

    #[test]
    fn test_forwarded_for_is_optional() {
        let principal =
            principal_from_headers(&headers(&[("x-user-id", "2"), ("x-user-role", "employee")]))
                .unwrap();
        assert_eq!(principal.role, Role::Employee);
        assert!(principal.ip_address.is_none());
    }

    #[test]
    fn test_missing_or_bad_user_id() {
        for pairs in [
            vec![("x-user-role", "admin")],
            vec![("x-user-id", "abc"), ("x-user-role", "admin")],
            vec![("x-user-id", "0"), ("x-user-role", "admin")],
        ] {
            let err = principal_from_headers(&headers(&pairs)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Auth);
        }
    }

    #[test]
    fn test_unknown_role() {
        let err = principal_from_headers(&headers(&[("x-user-id", "1"), ("x-user-role", "root")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown user role");
    }
}
