pub mod controllers;
pub mod models;
pub mod services;

pub use models::{InvoiceEvent, WebhookEvent};
pub use services::{WebhookError, WebhookHandler, WebhookOutcome, WebhookState, WebhookVerifier};
