use actix_web::{App, HttpServer};
use anyhow::Context;

use splitpay::app::configure_receiver;
use splitpay::config::ReceiverConfig;
use splitpay::core::telemetry::init_tracing;
use splitpay::middleware::{ErrorHandler, RequestId};
use splitpay::webhooks::WebhookState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("splitpay=debug,webhook_receiver=debug,actix_web=info");

    let config = ReceiverConfig::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    let state = WebhookState::new(config.webhook.secret.clone(), config.webhook.tolerance_secs);
    if state.is_verifying() {
        tracing::info!("Webhook receiver verifying signatures");
    } else {
        tracing::warn!("STRIPE_WEBHOOK_SECRET not set; accepting unsigned events");
    }

    tracing::info!("Environment: {}", config.app.env);

    let bind_address = config.server.bind_address();
    let routes = configure_receiver(state);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(ErrorHandler)
            .wrap(RequestId)
            .configure(routes.clone())
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Webhook receiver listening at http://{}", bind_address);

    server.await?;
    Ok(())
}
