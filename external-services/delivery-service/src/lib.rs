//! Delivery provider integration for MailGate
//!
//! The gateway performs a single best-effort forward per request: the
//! assembled envelope is posted to the provider's transactional send
//! endpoint and any non-2xx answer is a delivery failure. There is no
//! queueing, no protocol-level retry and no bounce handling here.

pub mod envelope;
pub mod error;
pub mod service;

pub use envelope::{ContentPart, DkimSignature, EmailAddress, MailEnvelope, Personalization};
pub use error::{DeliveryError, DeliveryResult};
pub use service::{DeliveryConfig, DeliveryService};
