//! The quota-gated send pipeline
//!
//! One request flows through permission check, field validation, policy
//! filtering, provider dispatch, quota debit and audit persistence, in
//! that order. Everything before dispatch can reject the request;
//! everything after dispatch must not. Once the provider has accepted
//! the message, failing the response would make the caller retry and
//! double-send, so the debit and the audit write only log their
//! failures.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use delivery_service::envelope::sender_domain;
use delivery_service::{DkimSignature, EmailAddress, MailEnvelope};

use crate::error::ApiError;
use crate::services::{AuditStore, BlocklistSource, LedgerStore, MailDispatcher};
use crate::{validate_field, validate_required};

/// Send request body.
///
/// Field presence is validated here rather than at deserialization so
/// each absence yields its contract message instead of a framework 422.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SendMailRequest {
    /// Display name for the sender; defaults to the sender address
    pub from_name: Option<String>,
    /// Recipient address
    pub to_mail: Option<String>,
    /// Display name for the recipient; defaults to the recipient address
    pub to_name: Option<String>,
    /// Message subject
    pub subject: Option<String>,
    /// Message body
    pub content: Option<String>,
    /// Send the body as text/html instead of text/plain
    #[serde(default)]
    pub is_html: bool,
}

/// Orchestrates one send request end to end
pub struct SendPipeline {
    ledger: Arc<dyn LedgerStore>,
    audit: Arc<dyn AuditStore>,
    blocklist: Arc<dyn BlocklistSource>,
    dispatcher: Arc<dyn MailDispatcher>,
    dkim_selector: Option<String>,
    dkim_private_key: Option<String>,
}

impl SendPipeline {
    pub fn new(
        ledger: Arc<dyn LedgerStore>,
        audit: Arc<dyn AuditStore>,
        blocklist: Arc<dyn BlocklistSource>,
        dispatcher: Arc<dyn MailDispatcher>,
        dkim_selector: Option<String>,
        dkim_private_key: Option<String>,
    ) -> Self {
        Self {
            ledger,
            audit,
            blocklist,
            dispatcher,
            dkim_selector,
            dkim_private_key,
        }
    }

    /// Run the pipeline for one resolved sender identity.
    ///
    /// `origin` is the requester's network origin for the audit trail.
    pub async fn execute(
        &self,
        address: &str,
        request: &SendMailRequest,
        origin: Option<&str>,
    ) -> Result<(), ApiError> {
        // 1. Permission: enabled account with remaining balance. One
        //    uniform rejection; account existence is not distinguishable.
        let account = self.ledger.account(address).await?;
        let allowed = account
            .map(|a| a.enabled && a.balance > 0)
            .unwrap_or(false);
        if !allowed {
            return Err(ApiError::NoBalance);
        }

        // 2. Required fields, each with its own message
        validate_required!(address, "No address");
        let to_mail = required_field(request.to_mail.as_deref(), "Invalid to mail")?;
        let subject = required_field(request.subject.as_deref(), "Invalid subject")?;
        let content = required_field(request.content.as_deref(), "Invalid content")?;

        // 3. Policy filter over the current block list snapshot
        let blocked = self.blocklist.blocked_substrings().await;
        if blocked
            .iter()
            .any(|s| !s.is_empty() && to_mail.contains(s.as_str()))
        {
            return Err(ApiError::Blocked);
        }

        // 4. Envelope assembly; signing is all-or-nothing
        let from_name = request
            .from_name
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| address.to_string());
        let to_name = request
            .to_name
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| to_mail.to_string());
        let dkim = DkimSignature::from_parts(
            sender_domain(address),
            self.dkim_selector.as_deref(),
            self.dkim_private_key.as_deref(),
        );
        let envelope = MailEnvelope::single(
            EmailAddress::new(address, Some(from_name)),
            EmailAddress::new(to_mail, Some(to_name)),
            subject,
            content,
            request.is_html,
            dkim,
        );

        // 5. Dispatch, exactly once
        self.dispatcher.dispatch(&envelope).await?;
        info!(address = %address, to = %to_mail, "Mail dispatched");

        // 6. Quota debit. The mail is already out; a billing miss is
        //    recoverable, a double send is not.
        match self.ledger.debit(address).await {
            Ok(0) => warn!(address = %address, "Debit affected no rows, billing miss"),
            Ok(_) => {}
            Err(e) => error!(address = %address, error = %e, "Failed to debit balance after send"),
        }

        // 7. Audit write, same rule
        let mut mail = envelope.redacted();
        if let Value::Object(map) = &mut mail {
            map.insert(
                "origin".to_string(),
                origin.map(|o| Value::String(o.to_string())).unwrap_or(Value::Null),
            );
        }
        if let Err(e) = self.audit.record(address, &mail).await {
            error!(address = %address, error = %e, "Failed to store audit record");
        }

        Ok(())
    }
}

fn required_field<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str, ApiError> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::validation(message))
}
