//! Token verification for the two identity paths
//!
//! Both paths verify an HS256 token against the shared deployment secret
//! and extract the `address` claim. Session tokens ride the Authorization
//! header and keep standard expiry validation. Sender tokens arrive in
//! the body of external send requests and skip `exp` entirely: they
//! double as long-lived SMTP credentials for upstream relays, and their
//! verification failures all collapse to one opaque unauthorized signal.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Claims carried by both token kinds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderClaims {
    /// The sender identity the token was issued for
    pub address: String,
    /// Expiry, required for session tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Shared verification secret for this deployment
pub fn token_secret_from_env() -> String {
    std::env::var("TOKEN_SECRET").unwrap_or_else(|_| "change-me-in-production".to_string())
}

/// Verify a session token from the Authorization header
pub fn verify_session_token(token: &str, secret: &str) -> Result<SenderClaims, ApiError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<SenderClaims>(token, &decoding_key, &validation)
        .map_err(|e| ApiError::authentication(format!("Invalid or expired token: {}", e)))?;

    Ok(token_data.claims)
}

/// Verify an out-of-band sender token carried in a request body.
///
/// Nothing about why verification failed is surfaced to the caller.
pub fn verify_sender_token(token: &str, secret: &str) -> Result<SenderClaims, ApiError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims = Default::default();

    let claims = decode::<SenderClaims>(token, &decoding_key, &validation)
        .map_err(|_| ApiError::authentication("Unauthorized"))?
        .claims;

    if claims.address.trim().is_empty() {
        return Err(ApiError::authentication("Unauthorized"));
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn issue(claims: &SenderClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn far_future() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[test]
    fn test_session_token_round_trip() {
        let token = issue(
            &SenderClaims {
                address: "a@x.com".to_string(),
                exp: Some(far_future()),
            },
            SECRET,
        );
        let claims = verify_session_token(&token, SECRET).unwrap();
        assert_eq!(claims.address, "a@x.com");
    }

    #[test]
    fn test_session_token_wrong_secret() {
        let token = issue(
            &SenderClaims {
                address: "a@x.com".to_string(),
                exp: Some(far_future()),
            },
            "other-secret",
        );
        assert!(verify_session_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_sender_token_without_exp() {
        let token = issue(
            &SenderClaims {
                address: "a@x.com".to_string(),
                exp: None,
            },
            SECRET,
        );
        let claims = verify_sender_token(&token, SECRET).unwrap();
        assert_eq!(claims.address, "a@x.com");
    }

    #[test]
    fn test_sender_token_tampered_signature() {
        let token = issue(
            &SenderClaims {
                address: "a@x.com".to_string(),
                exp: None,
            },
            "other-secret",
        );
        let err = verify_sender_token(&token, SECRET).unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized");
    }

    #[test]
    fn test_sender_token_garbage() {
        let err = verify_sender_token("not-a-token", SECRET).unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized");
    }

    #[test]
    fn test_sender_token_empty_address_claim() {
        let token = issue(
            &SenderClaims {
                address: "".to_string(),
                exp: None,
            },
            SECRET,
        );
        let err = verify_sender_token(&token, SECRET).unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized");
    }
}
