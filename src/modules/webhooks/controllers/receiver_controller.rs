use actix_web::{post, web, HttpRequest, HttpResponse};
use tracing::{info, warn};

use super::webhook_controller::{extract_signature, WebhookAck};
use crate::modules::webhooks::services::{WebhookError, WebhookOutcome, WebhookState};

/// Configure the permissive receiver route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(receive_webhook);
}

/// Receive a processor event, verifying it only when a secret is configured
///
/// POST /webhook
///
/// Failures answer `200 OK` with `{success: false}`, unlike the installment
/// service endpoint.
#[post("/webhook")]
async fn receive_webhook(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<WebhookState>,
) -> HttpResponse {
    let signature = extract_signature(&req);

    let event = match state.accept(&body, signature.as_deref()) {
        Ok(event) => event,
        Err(WebhookError::MalformedPayload(e)) => {
            warn!(error = %e, "Webhook error while parsing basic request");
            return HttpResponse::Ok().json(WebhookAck::refused());
        }
        Err(e) => {
            warn!(error = %e, "Webhook event verification failed");
            return HttpResponse::Ok().json(WebhookAck::refused());
        }
    };

    if let WebhookOutcome::Ignored { event_type } = state.handler.handle(&event) {
        info!(event_type = event_type.as_str(), "Unhandled event type");
    }

    HttpResponse::Ok().json(WebhookAck::accepted())
}
