use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const INVOICE_PAID: &str = "invoice.paid";
pub const INVOICE_PAYMENT_FAILED: &str = "invoice.payment_failed";

/// Processor event delivered to the webhook endpoints
///
/// Only `type` and `data.object` are relied upon; everything else is kept
/// opaque.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub data: EventData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventData {
    pub object: Value,
}

/// Event kinds this service reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceEvent {
    Paid { invoice_id: Option<String> },
    PaymentFailed { invoice_id: Option<String> },
    Other { event_type: String },
}

impl WebhookEvent {
    /// `data.object.id`, when the object carries one
    pub fn object_id(&self) -> Option<String> {
        self.data
            .object
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    pub fn kind(&self) -> InvoiceEvent {
        match self.event_type.as_str() {
            INVOICE_PAID => InvoiceEvent::Paid {
                invoice_id: self.object_id(),
            },
            INVOICE_PAYMENT_FAILED => InvoiceEvent::PaymentFailed {
                invoice_id: self.object_id(),
            },
            other => InvoiceEvent::Other {
                event_type: other.to_string(),
            },
        }
    }
}
