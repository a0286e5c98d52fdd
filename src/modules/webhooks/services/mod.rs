pub mod signature;
pub mod webhook_handler;

pub use signature::{signature_header, WebhookError, WebhookVerifier};
pub use webhook_handler::{WebhookHandler, WebhookOutcome, WebhookState};
