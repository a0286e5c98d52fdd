use actix_web::{post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::modules::webhooks::services::WebhookState;

/// Header carrying the processor's signature
pub const SIGNATURE_HEADER: &str = "Stripe-Signature";

/// Body of every webhook response
///
/// Deliberately carries no detail about why an event was refused.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookAck {
    pub success: bool,
}

impl WebhookAck {
    pub fn accepted() -> Self {
        Self { success: true }
    }

    pub fn refused() -> Self {
        Self { success: false }
    }
}

/// Configure the verified webhook route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(process_webhook);
}

/// Receive a signed processor event
///
/// POST /webhook
///
/// # Headers
/// * `Stripe-Signature` - `t=<timestamp>,v1=<signature>`
///
/// # Returns
/// * `200 OK` `{success: true}` - Signature verified (handled or not)
/// * `400 Bad Request` `{success: false}` - Malformed payload or bad signature
#[post("/webhook")]
async fn process_webhook(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<WebhookState>,
) -> HttpResponse {
    let signature = extract_signature(&req);

    match state.verify(&body, signature.as_deref()) {
        Ok(event) => {
            state.handler.handle(&event);
            HttpResponse::Ok().json(WebhookAck::accepted())
        }
        Err(e) => {
            warn!(error = %e, "Rejected webhook");
            HttpResponse::BadRequest().json(WebhookAck::refused())
        }
    }
}

/// Extract the signature header, if present and valid UTF-8
pub(crate) fn extract_signature(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(SIGNATURE_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(String::from)
}
