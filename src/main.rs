use std::sync::Arc;

use actix_web::{App, HttpServer};
use anyhow::Context;

use splitpay::app::InstallmentApp;
use splitpay::config::{Config, DatabaseConfig};
use splitpay::core::telemetry::init_tracing;
use splitpay::customers::{CustomerRepository, InMemoryCustomerRepository, MySqlCustomerRepository};
use splitpay::gateways::{PaymentProcessor, StripeClient};
use splitpay::middleware::{ErrorHandler, RequestId};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("splitpay=debug,actix_web=info");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    tracing::info!("Starting SplitPay installment service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let processor: Arc<dyn PaymentProcessor> = Arc::new(StripeClient::new(
        config.stripe.secret_key.clone(),
        Some(config.stripe.api_base.clone()),
    ));

    let customers: Arc<dyn CustomerRepository> = match &config.database {
        Some(database) => {
            let pool = database
                .create_pool()
                .await
                .context("Failed to create database pool")?;
            DatabaseConfig::migrate(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!(
                "Customer directory backed by MySQL ({} connections)",
                database.max_connections
            );
            Arc::new(MySqlCustomerRepository::new(pool))
        }
        None => {
            tracing::info!("Customer directory held in memory (lost on restart)");
            Arc::new(InMemoryCustomerRepository::seeded())
        }
    };

    if config.webhook.secret.is_none() {
        tracing::warn!("STRIPE_WEBHOOK_SECRET not set; every /webhook call will be rejected");
    }

    let app = InstallmentApp::build(&config, processor, customers);

    if let Some(sender) = app.deferred_sender.clone() {
        actix_web::rt::spawn(sender.start());
    } else {
        tracing::info!("Deferred sender disabled; second installments rely on processor automation");
    }

    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        let app = app.clone();
        App::new()
            .wrap(ErrorHandler)
            .wrap(RequestId)
            .configure(move |cfg| app.configure(cfg))
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
