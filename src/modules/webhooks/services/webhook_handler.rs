use serde_json::Value;
use tracing::{debug, info, warn};

use super::signature::{WebhookError, WebhookVerifier};
use crate::modules::webhooks::models::{InvoiceEvent, WebhookEvent};

/// What the handler did with an accepted event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    InvoicePaid { invoice_id: Option<String> },
    PaymentFailed { invoice_id: Option<String> },
    Ignored { event_type: String },
}

/// Reacts to verified invoice lifecycle events
///
/// Reactions are log lines only; no state is kept.
#[derive(Debug, Clone, Default)]
pub struct WebhookHandler;

impl WebhookHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, event: &WebhookEvent) -> WebhookOutcome {
        match event.kind() {
            InvoiceEvent::Paid { invoice_id } => {
                info!(
                    event_id = event.id.as_deref().unwrap_or("-"),
                    invoice_id = invoice_id.as_deref().unwrap_or("unknown"),
                    "Invoice was paid"
                );
                WebhookOutcome::InvoicePaid { invoice_id }
            }
            InvoiceEvent::PaymentFailed { invoice_id } => {
                warn!(
                    event_id = event.id.as_deref().unwrap_or("-"),
                    invoice_id = invoice_id.as_deref().unwrap_or("unknown"),
                    "Payment for invoice failed"
                );
                WebhookOutcome::PaymentFailed { invoice_id }
            }
            InvoiceEvent::Other { event_type } => {
                debug!(event_type = event_type.as_str(), "Ignoring webhook event");
                WebhookOutcome::Ignored { event_type }
            }
        }
    }
}

/// Shared state of both webhook endpoints
#[derive(Debug, Clone)]
pub struct WebhookState {
    verifier: Option<WebhookVerifier>,
    pub handler: WebhookHandler,
}

impl WebhookState {
    pub fn new(secret: Option<String>, tolerance_secs: u64) -> Self {
        Self {
            verifier: secret.map(|s| WebhookVerifier::new(s, tolerance_secs)),
            handler: WebhookHandler::new(),
        }
    }

    pub fn is_verifying(&self) -> bool {
        self.verifier.is_some()
    }

    /// Strict path: the event must carry a valid signature
    ///
    /// Without a configured secret nothing can be verified, so every event
    /// is refused.
    pub fn verify(&self, payload: &[u8], header: Option<&str>) -> Result<WebhookEvent, WebhookError> {
        match &self.verifier {
            Some(verifier) => verifier.construct_event(payload, header),
            None => Err(WebhookError::MissingSecret),
        }
    }

    /// Permissive path: parse as generic JSON first, verify only when a
    /// secret is configured
    pub fn accept(&self, payload: &[u8], header: Option<&str>) -> Result<WebhookEvent, WebhookError> {
        let parsed: Value = serde_json::from_slice(payload)?;

        match &self.verifier {
            Some(verifier) => verifier
                .construct_event(payload, header)
                .map_err(|e| match e {
                    WebhookError::MalformedPayload(source) => WebhookError::InvalidEvent(source),
                    other => other,
                }),
            None => serde_json::from_value(parsed).map_err(WebhookError::InvalidEvent),
        }
    }
}
