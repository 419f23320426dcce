//! Per-request context extraction
//!
//! The requester's network origin is taken best-effort from the trusted
//! reverse-proxy headers; the gateway never inspects the socket address
//! directly.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, HeaderMap};
use uuid::Uuid;

use crate::error::ApiError;

/// Request metadata available to handlers and the audit trail
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Correlation ID for logs
    pub request_id: String,
    /// Requester origin from the trusted proxy header, if present
    pub remote_addr: Option<String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            remote_addr: None,
        }
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        let remote_addr = headers
            .get("x-forwarded-for")
            .and_then(|h| h.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .or_else(|| {
                headers
                    .get("x-real-ip")
                    .and_then(|h| h.to_str().ok())
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
            });

        Self {
            request_id: Uuid::new_v4().to_string(),
            remote_addr,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_remote_addr_from_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        let context = RequestContext::from_headers(&headers);
        assert_eq!(context.remote_addr.as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_remote_addr_fallback_to_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));
        let context = RequestContext::from_headers(&headers);
        assert_eq!(context.remote_addr.as_deref(), Some("198.51.100.2"));
    }

    #[test]
    fn test_remote_addr_absent() {
        let context = RequestContext::from_headers(&HeaderMap::new());
        assert!(context.remote_addr.is_none());
    }
}
