// Provider wire types for one outbound message
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A mailbox with an optional display name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailAddress {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EmailAddress {
    pub fn new(email: impl Into<String>, name: Option<String>) -> Self {
        Self {
            email: email.into(),
            name,
        }
    }
}

/// Delivery-time signing instructions for the sending domain.
///
/// Attached to the envelope only when the deployment carries a signing
/// key and selector AND the sender address yields a domain; a partial
/// set is never sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DkimSignature {
    pub domain: String,
    pub selector: String,
    pub private_key: String,
}

impl DkimSignature {
    /// All-or-nothing assembly from the configured parts and the sender
    /// address. Any missing or empty part omits signing entirely.
    pub fn from_parts(
        domain: Option<&str>,
        selector: Option<&str>,
        private_key: Option<&str>,
    ) -> Option<Self> {
        match (domain, selector, private_key) {
            (Some(d), Some(s), Some(k)) if !d.is_empty() && !s.is_empty() && !k.is_empty() => {
                Some(Self {
                    domain: d.to_string(),
                    selector: s.to_string(),
                    private_key: k.to_string(),
                })
            }
            _ => None,
        }
    }
}

/// The sending domain of an address: the substring after `@`, if any
pub fn sender_domain(address: &str) -> Option<&str> {
    address
        .split_once('@')
        .map(|(_, domain)| domain)
        .filter(|domain| !domain.is_empty())
}

/// One recipient group with optional signing instructions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Personalization {
    pub to: Vec<EmailAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dkim_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dkim_selector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dkim_private_key: Option<String>,
}

/// One body part, `text/plain` or `text/html`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "type")]
    pub content_type: String,
    pub value: String,
}

/// The provider-facing message envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailEnvelope {
    pub personalizations: Vec<Personalization>,
    pub from: EmailAddress,
    pub subject: String,
    pub content: Vec<ContentPart>,
}

impl MailEnvelope {
    /// Assemble an envelope for a single recipient
    pub fn single(
        from: EmailAddress,
        to: EmailAddress,
        subject: impl Into<String>,
        body: impl Into<String>,
        is_html: bool,
        dkim: Option<DkimSignature>,
    ) -> Self {
        let content_type = if is_html { "text/html" } else { "text/plain" };
        let (dkim_domain, dkim_selector, dkim_private_key) = match dkim {
            Some(sig) => (Some(sig.domain), Some(sig.selector), Some(sig.private_key)),
            None => (None, None, None),
        };

        Self {
            personalizations: vec![Personalization {
                to: vec![to],
                dkim_domain,
                dkim_selector,
                dkim_private_key,
            }],
            from,
            subject: subject.into(),
            content: vec![ContentPart {
                content_type: content_type.to_string(),
                value: body.into(),
            }],
        }
    }

    /// A JSON copy safe for audit persistence: the signing secret is
    /// stripped, everything else (recipient, sender, subject, content,
    /// signing domain/selector) is kept verbatim.
    pub fn redacted(&self) -> Value {
        let mut copy = self.clone();
        for personalization in &mut copy.personalizations {
            personalization.dkim_private_key = None;
        }
        serde_json::to_value(copy).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(dkim: Option<DkimSignature>) -> MailEnvelope {
        MailEnvelope::single(
            EmailAddress::new("a@x.com", Some("Alice".to_string())),
            EmailAddress::new("b@y.com", Some("b@y.com".to_string())),
            "hi",
            "hello",
            false,
            dkim,
        )
    }

    #[test]
    fn test_sender_domain() {
        assert_eq!(sender_domain("a@x.com"), Some("x.com"));
        assert_eq!(sender_domain("no-at-sign"), None);
        assert_eq!(sender_domain("trailing@"), None);
    }

    #[test]
    fn test_dkim_requires_all_parts() {
        assert!(DkimSignature::from_parts(Some("x.com"), Some("sel"), Some("key")).is_some());
        assert!(DkimSignature::from_parts(None, Some("sel"), Some("key")).is_none());
        assert!(DkimSignature::from_parts(Some("x.com"), None, Some("key")).is_none());
        assert!(DkimSignature::from_parts(Some("x.com"), Some("sel"), None).is_none());
        assert!(DkimSignature::from_parts(Some(""), Some("sel"), Some("key")).is_none());
    }

    #[test]
    fn test_envelope_content_type_selection() {
        let plain = sample(None);
        assert_eq!(plain.content[0].content_type, "text/plain");

        let html = MailEnvelope::single(
            EmailAddress::new("a@x.com", None),
            EmailAddress::new("b@y.com", None),
            "hi",
            "<b>hello</b>",
            true,
            None,
        );
        assert_eq!(html.content[0].content_type, "text/html");
    }

    #[test]
    fn test_unsigned_envelope_omits_dkim_fields() {
        let envelope = sample(None);
        let json = serde_json::to_value(&envelope).unwrap();
        let personalization = &json["personalizations"][0];
        assert!(personalization.get("dkim_domain").is_none());
        assert!(personalization.get("dkim_selector").is_none());
        assert!(personalization.get("dkim_private_key").is_none());
    }

    #[test]
    fn test_redacted_strips_private_key_only() {
        let envelope = sample(DkimSignature::from_parts(
            Some("x.com"),
            Some("mail"),
            Some("secret-key"),
        ));
        let redacted = envelope.redacted();
        let personalization = &redacted["personalizations"][0];
        assert!(personalization.get("dkim_private_key").is_none());
        assert_eq!(personalization["dkim_domain"], "x.com");
        assert_eq!(personalization["dkim_selector"], "mail");
        assert_eq!(redacted["subject"], "hi");
        assert!(!redacted.to_string().contains("secret-key"));
    }
}
