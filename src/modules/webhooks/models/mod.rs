pub mod webhook_event;

pub use webhook_event::{EventData, InvoiceEvent, WebhookEvent, INVOICE_PAID, INVOICE_PAYMENT_FAILED};
