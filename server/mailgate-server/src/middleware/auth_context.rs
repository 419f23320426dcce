//! Authentication context extraction middleware
//!
//! Provides automatic extraction of the session identity from the
//! Authorization header, so handlers receive a resolved sender address
//! instead of parsing tokens themselves.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};

use crate::auth::tokens;
use crate::error::ApiError;
use crate::middleware::RequestContext;

/// Authenticated sender identity extracted from the session token
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The sender address this request acts for
    pub address: String,
    /// Request context (automatically extracted)
    pub request: RequestContext,
}

impl AuthContext {
    /// Create a new AuthContext (for testing/mocking)
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            request: RequestContext::new(),
        }
    }
}

/// Extract the bearer token from the Authorization header
fn extract_token(parts: &Parts) -> Result<String, ApiError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::authentication("Missing Authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| {
            ApiError::authentication("Invalid Authorization header format. Expected: Bearer <token>")
        })
        .map(|s| s.to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let request = RequestContext::from_request_parts(parts, state).await?;
        let token = extract_token(parts)?;
        let claims = tokens::verify_session_token(&token, &tokens::token_secret_from_env())?;

        Ok(AuthContext {
            address: claims.address,
            request,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_context_new() {
        let ctx = AuthContext::new("a@x.com");
        assert_eq!(ctx.address, "a@x.com");
        assert!(ctx.request.remote_addr.is_none());
    }
}
