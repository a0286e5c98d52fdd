// Fixtures: configuration, wired applications and webhook payloads

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use splitpay::app::InstallmentApp;
use splitpay::config::Config;
use splitpay::customers::{CustomerRepository, InMemoryCustomerRepository};
use splitpay::gateways::PaymentProcessor;
use splitpay::webhooks::services::signature_header;

pub const TEST_WEBHOOK_SECRET: &str = "whsec_test_secret";

/// Configuration with test defaults; `overrides` replace environment values
pub fn test_config(overrides: &[(&str, &str)]) -> Config {
    let mut values: HashMap<String, String> = HashMap::from([
        ("STRIPE_SECRET_KEY".to_string(), "sk_test_123".to_string()),
        ("DEFERRED_SEND_ENABLED".to_string(), "false".to_string()),
    ]);
    for (key, value) in overrides {
        values.insert(key.to_string(), value.to_string());
    }
    Config::from_lookup(&|key: &str| values.get(key).cloned()).expect("test config")
}

/// Installment app over the given doubles, webhook secret configured
pub fn build_app(
    processor: Arc<dyn PaymentProcessor>,
    repository: Arc<InMemoryCustomerRepository>,
) -> InstallmentApp {
    let config = test_config(&[("STRIPE_WEBHOOK_SECRET", TEST_WEBHOOK_SECRET)]);
    let customers: Arc<dyn CustomerRepository> = repository;
    InstallmentApp::build(&config, processor, customers)
}

/// Serialized event of `event_type` carrying an invoice object
pub fn invoice_event_body(event_type: &str, invoice_id: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "id": "evt_test_1",
        "object": "event",
        "type": event_type,
        "data": {
            "object": {
                "id": invoice_id,
                "object": "invoice",
                "amount_due": 500
            }
        }
    }))
    .expect("serialize event")
}

/// Current-time signature header for `body`
pub fn sign(secret: &str, body: &[u8]) -> String {
    signature_header(secret, Utc::now().timestamp(), body)
}
