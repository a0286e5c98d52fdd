// Integration tests for the verified POST /webhook of the installment service

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use actix_web::{http::StatusCode, test, App};
use chrono::Utc;
use serde_json::{json, Value};
use splitpay::app::InstallmentApp;
use splitpay::customers::InMemoryCustomerRepository;
use splitpay::webhooks::services::signature_header;

use helpers::*;

macro_rules! init_app {
    () => {{
        let app = build_app(
            Arc::new(RecordingProcessor::new()),
            Arc::new(InMemoryCustomerRepository::seeded()),
        );
        test::init_service(App::new().configure(move |cfg| app.configure(cfg))).await
    }};
}

fn webhook(body: Vec<u8>, signature: Option<String>) -> actix_web::test::TestRequest {
    let mut req = test::TestRequest::post()
        .uri("/webhook")
        .insert_header(("content-type", "application/json"))
        .set_payload(body);
    if let Some(signature) = signature {
        req = req.insert_header(("Stripe-Signature", signature));
    }
    req
}

#[actix_web::test]
async fn test_signed_invoice_paid_is_accepted() {
    let app = init_app!();
    let body = invoice_event_body("invoice.paid", "in_123");
    let signature = sign(TEST_WEBHOOK_SECRET, &body);

    let resp = test::call_service(&app, webhook(body, Some(signature)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let ack: Value = test::read_body_json(resp).await;
    assert_eq!(ack, json!({"success": true}));
}

#[actix_web::test]
async fn test_signed_payment_failed_is_accepted() {
    let app = init_app!();
    let body = invoice_event_body("invoice.payment_failed", "in_456");
    let signature = sign(TEST_WEBHOOK_SECRET, &body);

    let resp = test::call_service(&app, webhook(body, Some(signature)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_unhandled_event_type_is_acknowledged() {
    let app = init_app!();
    let body = invoice_event_body("customer.created", "cus_1");
    let signature = sign(TEST_WEBHOOK_SECRET, &body);

    let resp = test::call_service(&app, webhook(body, Some(signature)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let ack: Value = test::read_body_json(resp).await;
    assert_eq!(ack["success"], true);
}

#[actix_web::test]
async fn test_event_without_id_is_acknowledged() {
    let app = init_app!();
    let body = br#"{"type":"invoice.paid","data":{"object":{"id":"in_1"}}}"#.to_vec();
    let signature = sign(TEST_WEBHOOK_SECRET, &body);

    let resp = test::call_service(&app, webhook(body, Some(signature)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_bad_signature_is_refused() {
    let app = init_app!();
    let body = invoice_event_body("invoice.paid", "in_123");
    let signature = sign("whsec_wrong", &body);

    let resp = test::call_service(&app, webhook(body, Some(signature)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let ack: Value = test::read_body_json(resp).await;
    assert_eq!(ack, json!({"success": false}));
}

#[actix_web::test]
async fn test_missing_signature_is_refused() {
    let app = init_app!();
    let body = invoice_event_body("invoice.paid", "in_123");

    let resp = test::call_service(&app, webhook(body, None).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_stale_signature_is_refused() {
    let app = init_app!();
    let body = invoice_event_body("invoice.paid", "in_123");
    let signature = signature_header(TEST_WEBHOOK_SECRET, Utc::now().timestamp() - 600, &body);

    let resp = test::call_service(&app, webhook(body, Some(signature)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_malformed_body_is_refused() {
    let app = init_app!();
    let body = b"{not json".to_vec();
    let signature = sign(TEST_WEBHOOK_SECRET, &body);

    let resp = test::call_service(&app, webhook(body, Some(signature)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let ack: Value = test::read_body_json(resp).await;
    assert_eq!(ack["success"], false);
}

#[actix_web::test]
async fn test_missing_secret_refuses_everything() {
    let config = test_config(&[]);
    let app = InstallmentApp::build(
        &config,
        Arc::new(RecordingProcessor::new()),
        Arc::new(InMemoryCustomerRepository::seeded()),
    );
    assert!(!app.webhooks.is_verifying());
    let app = test::init_service(App::new().configure(move |cfg| app.configure(cfg))).await;

    let body = invoice_event_body("invoice.paid", "in_123");
    let signature = sign(TEST_WEBHOOK_SECRET, &body);

    let resp = test::call_service(&app, webhook(body, Some(signature)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
