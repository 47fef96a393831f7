use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use pageforge_auth::{JwtValidator, Principal};

use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

/// Optional bearer authentication.
///
/// Every route on this API may be called anonymously (the per-route guards
/// decide what anonymous callers can do), so a missing Authorization header
/// passes through without a principal. A header that is present but invalid
/// is still a hard 401.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    if let Some(token) = extract_bearer(req.headers())? {
        let claims = state
            .jwt
            .validate(token, Utc::now())
            .map_err(|_e| StatusCode::UNAUTHORIZED)?;

        req.extensions_mut()
            .insert(PrincipalContext::new(Principal::from_claims(&claims)));
    }

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<Option<&str>, StatusCode> {
    let Some(header) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok(None);
    };

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    // The scheme is case-insensitive (RFC 7235).
    let (scheme, rest) = header
        .split_once(' ')
        .ok_or(StatusCode::UNAUTHORIZED)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let token = rest.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(Some(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::AUTHORIZATION;

    #[test]
    fn missing_header_is_anonymous() {
        let headers = HeaderMap::new();
        assert_eq!(extract_bearer(&headers), Ok(None));
    }

    #[test]
    fn bearer_token_is_extracted() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(extract_bearer(&headers), Ok(Some("abc.def.ghi")));
    }

    #[test]
    fn scheme_matches_case_insensitively() {
        for scheme in ["bearer", "BEARER", "BeArEr"] {
            let mut headers = HeaderMap::new();
            headers.insert(
                AUTHORIZATION,
                format!("{scheme} abc.def.ghi").parse().unwrap(),
            );
            assert_eq!(extract_bearer(&headers), Ok(Some("abc.def.ghi")));
        }
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Basic dXNlcjpwdw==".parse().unwrap());
        assert_eq!(extract_bearer(&headers), Err(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn empty_bearer_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer ".parse().unwrap());
        assert_eq!(extract_bearer(&headers), Err(StatusCode::UNAUTHORIZED));
    }
}
