// Contract tests for POST /create-installment-plan and the page routes
//
// The processor is replaced by an in-process double; the customer directory
// is the seeded in-memory one.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use actix_web::{http::StatusCode, test, App};
use serde_json::{json, Value};
use splitpay::core::RemoteOperation;
use splitpay::customers::{CustomerRecord, InMemoryCustomerRepository};

use helpers::*;

macro_rules! init_app {
    ($processor:expr, $repository:expr) => {{
        let app = build_app($processor.clone(), $repository.clone());
        test::init_service(App::new().configure(move |cfg| app.configure(cfg))).await
    }};
}

#[actix_web::test]
async fn test_new_customer_plan_splits_total() {
    let processor = Arc::new(RecordingProcessor::new());
    let repository = Arc::new(InMemoryCustomerRepository::seeded());
    let app = init_app!(processor, repository);

    let req = test::TestRequest::post()
        .uri("/create-installment-plan")
        .set_json(json!({"email": "a@b.com", "amount": 1000, "description": "Payment Plan"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["amount_per_installment"], 500);
    assert!(body["first_invoice"].as_str().unwrap().starts_with("in_"));
    assert!(body["second_invoice"].as_str().unwrap().starts_with("in_"));
    assert_ne!(body["first_invoice"], body["second_invoice"]);

    assert_eq!(processor.customer_creations(), 1);
    let records = repository.snapshot().await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].email, "a@b.com");
}

#[actix_web::test]
async fn test_known_customer_reuses_directory_entry() {
    let processor = Arc::new(RecordingProcessor::new());
    let repository = Arc::new(InMemoryCustomerRepository::seeded());
    let app = init_app!(processor, repository);

    let req = test::TestRequest::post()
        .uri("/create-installment-plan")
        .set_json(json!({"email": CustomerRecord::fixture().email}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert_eq!(processor.customer_creations(), 0);
    assert_eq!(repository.snapshot().await.len(), 1);

    let invoices = processor.count(|c| match c {
        Call::CreateInvoice(invoice) => invoice.customer == "cus_123456789",
        _ => false,
    });
    assert_eq!(invoices, 2);
}

#[actix_web::test]
async fn test_odd_amount_drops_remainder() {
    let processor = Arc::new(RecordingProcessor::new());
    let repository = Arc::new(InMemoryCustomerRepository::seeded());
    let app = init_app!(processor, repository);

    let req = test::TestRequest::post()
        .uri("/create-installment-plan")
        .set_json(json!({"email": "odd@example.com", "amount": 999}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["amount_per_installment"], 499);
}

#[actix_web::test]
async fn test_zero_amount_is_rejected_without_remote_calls() {
    let processor = Arc::new(RecordingProcessor::new());
    let repository = Arc::new(InMemoryCustomerRepository::seeded());
    let app = init_app!(processor, repository);

    let req = test::TestRequest::post()
        .uri("/create-installment-plan")
        .set_json(json!({"email": "a@b.com", "amount": 0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"success": false, "error": "Amount must be at least $0.01"}));
    assert!(processor.calls().is_empty());
    assert_eq!(repository.snapshot().await.len(), 1);
}

#[actix_web::test]
async fn test_missing_email_is_a_json_failure() {
    let processor = Arc::new(RecordingProcessor::new());
    let repository = Arc::new(InMemoryCustomerRepository::seeded());
    let app = init_app!(processor, repository);

    let req = test::TestRequest::post()
        .uri("/create-installment-plan")
        .set_json(json!({"amount": 1000}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("email"));
    assert!(processor.calls().is_empty());
}

#[actix_web::test]
async fn test_defaults_apply_to_omitted_fields() {
    let processor = Arc::new(RecordingProcessor::new());
    let repository = Arc::new(InMemoryCustomerRepository::seeded());
    let app = init_app!(processor, repository);

    let req = test::TestRequest::post()
        .uri("/create-installment-plan")
        .set_json(json!({"email": "defaults@example.com"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["amount_per_installment"], 500);

    let descriptions: Vec<String> = processor
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::CreateInvoice(invoice) => Some(invoice.description),
            _ => None,
        })
        .collect();
    assert_eq!(
        descriptions,
        vec![
            "Payment Plan - Installment 1 of 2".to_string(),
            "Payment Plan - Installment 2 of 2".to_string(),
        ]
    );
}

#[actix_web::test]
async fn test_processor_failure_surfaces_message() {
    let processor = Arc::new(RecordingProcessor::failing(RemoteOperation::CreateInvoice));
    let repository = Arc::new(InMemoryCustomerRepository::seeded());
    let app = init_app!(processor, repository);

    let req = test::TestRequest::post()
        .uri("/create-installment-plan")
        .set_json(json!({"email": "a@b.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Simulated create invoice failure");
}

#[actix_web::test]
async fn test_index_page_links_plan_form() {
    let processor = Arc::new(RecordingProcessor::new());
    let repository = Arc::new(InMemoryCustomerRepository::seeded());
    let app = init_app!(processor, repository);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains("/create-installment-plan"));
}

#[actix_web::test]
async fn test_health_and_readiness() {
    let processor = Arc::new(RecordingProcessor::new());
    let repository = Arc::new(InMemoryCustomerRepository::seeded());
    let app = init_app!(processor, repository);

    let health = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(health.status(), StatusCode::OK);

    let ready = test::call_service(&app, test::TestRequest::get().uri("/ready").to_request()).await;
    assert_eq!(ready.status(), StatusCode::OK);
}
