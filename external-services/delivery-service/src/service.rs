// Delivery service implementation over the provider's HTTP send API
use crate::envelope::MailEnvelope;
use crate::error::{DeliveryError, DeliveryResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Delivery provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Provider send endpoint
    pub provider_url: String,
    /// Optional provider API key, sent as `X-Api-Key`
    pub api_key: Option<String>,
    /// DKIM selector for the deployment, if signing is configured
    pub dkim_selector: Option<String>,
    /// DKIM private key for the deployment, if signing is configured
    pub dkim_private_key: Option<String>,
}

impl DeliveryConfig {
    /// Load delivery configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            provider_url: std::env::var("PROVIDER_URL")
                .unwrap_or_else(|_| "https://api.mailchannels.net/tx/v1/send".to_string()),
            api_key: std::env::var("PROVIDER_API_KEY").ok(),
            dkim_selector: std::env::var("DKIM_SELECTOR").ok(),
            dkim_private_key: std::env::var("DKIM_PRIVATE_KEY").ok(),
        }
    }
}

/// Client for the external transactional-email provider
#[derive(Debug, Clone)]
pub struct DeliveryService {
    config: DeliveryConfig,
    http: reqwest::Client,
}

impl DeliveryService {
    pub fn new(config: DeliveryConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &DeliveryConfig {
        &self.config
    }

    /// Submit one envelope to the provider. Attempted exactly once; any
    /// status >= 300 or transport failure is a delivery failure. The
    /// provider's error text is logged for diagnostics, never returned
    /// to end callers in detail.
    pub async fn send(&self, envelope: &MailEnvelope) -> DeliveryResult<()> {
        let mut request = self.http.post(&self.config.provider_url).json(envelope);
        if let Some(api_key) = &self.config.api_key {
            request = request.header("X-Api-Key", api_key);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.as_u16() >= 300 {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            error!(
                status = status.as_u16(),
                body = %body,
                "Delivery provider rejected message"
            );
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = status.as_u16(), "Message accepted by provider");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::EmailAddress;

    fn config(url: String) -> DeliveryConfig {
        DeliveryConfig {
            provider_url: url,
            api_key: None,
            dkim_selector: None,
            dkim_private_key: None,
        }
    }

    fn envelope() -> MailEnvelope {
        MailEnvelope::single(
            EmailAddress::new("a@x.com", None),
            EmailAddress::new("b@y.com", None),
            "hi",
            "hello",
            false,
            None,
        )
    }

    #[tokio::test]
    async fn test_send_accepted() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/send")
            .match_header("content-type", "application/json")
            .with_status(202)
            .create_async()
            .await;

        let service = DeliveryService::new(config(format!("{}/send", server.url())));
        let result = service.send(&envelope()).await;

        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_rejected_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/send")
            .with_status(500)
            .with_body("provider exploded")
            .create_async()
            .await;

        let service = DeliveryService::new(config(format!("{}/send", server.url())));
        match service.send(&envelope()).await {
            Err(DeliveryError::Rejected { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "provider exploded");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_api_key_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/send")
            .match_header("x-api-key", "k-123")
            .with_status(200)
            .create_async()
            .await;

        let mut cfg = config(format!("{}/send", server.url()));
        cfg.api_key = Some("k-123".to_string());
        let service = DeliveryService::new(cfg);

        assert!(service.send(&envelope()).await.is_ok());
        mock.assert_async().await;
    }
}
