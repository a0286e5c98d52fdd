//! SplitPay installment service library
//!
//! Splits a payment into two processor invoices and reacts to invoice
//! lifecycle webhooks.

pub mod app;
pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::customers;
pub use modules::gateways;
pub use modules::installments;
pub use modules::webhooks;
