// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer token authentication middleware.

use crate::error::AppError;
use crate::models::token::scopes;
use crate::models::Identity;
use crate::AppState;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Extract the token from an `Authorization` header.
///
/// Returns `Ok(None)` if there is no header at all. Anything other than
/// exactly `Bearer <token>` is malformed.
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AppError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value.to_str().map_err(|_| AppError::MalformedCredential)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(Some(token)),
        _ => Err(AppError::MalformedCredential),
    }
}

/// Resolve the caller's [`Identity`] and attach it to the request.
///
/// Runs on every route. Requests without an `Authorization` header continue
/// as [`Identity::Anonymous`]; a malformed header or a token that does not
/// verify ends the request with 401.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = match resolve_identity(&state, request).await {
        Ok(request) => next.run(request).await,
        Err(e) => e.into_response(),
    };

    // Rejections included
    response
        .headers_mut()
        .append(header::VARY, HeaderValue::from_static("authorization"));
    response
}

async fn resolve_identity(state: &AppState, mut request: Request) -> Result<Request, AppError> {
    let identity = match bearer_token(request.headers())? {
        None => Identity::Anonymous,
        Some(token) => {
            let user = state
                .tokens
                .verify(scopes::AUTHENTICATION, token)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "Token verification failed");
                    AppError::InvalidCredential
                })?
                .ok_or(AppError::InvalidCredential)?;
            Identity::Authenticated(user)
        }
    };

    request.extensions_mut().insert(identity);
    Ok(request)
}

/// Reject anonymous callers. Layer after [`authenticate`].
pub async fn require_authenticated(
    identity: Identity,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if identity.is_anonymous() {
        return Err(AppError::Unauthenticated);
    }
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Identity>().cloned().ok_or_else(|| {
            tracing::error!(uri = %parts.uri, "Route reached without authentication middleware");
            AppError::Internal(anyhow::anyhow!("request identity missing"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_missing_header_is_anonymous() {
        assert!(matches!(bearer_token(&HeaderMap::new()), Ok(None)));
    }

    #[test]
    fn test_well_formed_bearer() {
        let headers = headers_with("Bearer abc123");
        assert_eq!(bearer_token(&headers).unwrap(), Some("abc123"));
    }

    #[test]
    fn test_malformed_headers_rejected() {
        for value in [
            "abc123",
            "Basic dXNlcjpwYXNz",
            "bearer abc123",
            "Bearer",
            "Bearer abc 123",
            "Bearer  abc123",
        ] {
            assert!(
                matches!(
                    bearer_token(&headers_with(value)),
                    Err(AppError::MalformedCredential)
                ),
                "expected {:?} to be malformed",
                value
            );
        }
    }

    #[tokio::test]
    async fn test_identity_extractor_without_middleware_is_internal_error() {
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/workouts/1")
            .body(())
            .unwrap()
            .into_parts();

        let err = Identity::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert!(err.is_internal());
    }
}
