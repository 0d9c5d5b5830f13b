//! Request identity (Bearer session token)
//!
//! Session tokens are read from `Authorization: Bearer <token>`, falling
//! back to the `__session` cookie set by the identity provider's frontend
//! SDK. Missing or rejected tokens give an anonymous context; actions decide
//! whether anonymous callers are allowed.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use converso::RequestContext;

use crate::error::ApiError;
use crate::AppState;

/// Cookie carrying the session token for same-site requests
pub const SESSION_COOKIE: &str = "__session";

/// Identity of the caller
pub struct Identity(pub RequestContext);

/// Extract a Bearer token from the Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Extract the session cookie value
pub fn extract_session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value)
}

#[async_trait]
impl FromRequestParts<AppState> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)
            .or_else(|| extract_session_cookie(&parts.headers));

        let Some(token) = token else {
            return Ok(Self(RequestContext::anonymous()));
        };

        let context = match state.identity.authenticate(token).await? {
            Some(session) => RequestContext::authenticated(session),
            None => RequestContext::anonymous(),
        };

        Ok(Self(context))
    }
}
