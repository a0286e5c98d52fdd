//! Route and shared-state wiring for both binaries

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;

use crate::config::Config;
use crate::middleware::json_error_handler;
use crate::modules::customers::{CustomerRepository, CustomerService};
use crate::modules::gateways::PaymentProcessor;
use crate::modules::installments::{DeferredInvoiceSender, InstallmentService, PlanOptions};
use crate::modules::webhooks::WebhookState;
use crate::modules::{health, installments, pages, webhooks};

/// Shared state of the installment service
#[derive(Clone)]
pub struct InstallmentApp {
    pub installments: Arc<InstallmentService>,
    pub customers: Arc<dyn CustomerRepository>,
    pub webhooks: WebhookState,
    pub deferred_sender: Option<Arc<DeferredInvoiceSender>>,
}

impl InstallmentApp {
    /// Assemble services from configuration and injected collaborators
    pub fn build(
        config: &Config,
        processor: Arc<dyn PaymentProcessor>,
        customers: Arc<dyn CustomerRepository>,
    ) -> Self {
        let customer_service = Arc::new(CustomerService::new(customers.clone(), processor.clone()));
        let mut service = InstallmentService::new(
            customer_service,
            processor.clone(),
            PlanOptions::from(&config.installments),
        );

        let deferred = &config.installments.deferred_send;
        let deferred_sender = deferred.enabled.then(|| {
            Arc::new(DeferredInvoiceSender::new(
                processor,
                Duration::from_secs(deferred.interval_secs),
            ))
        });
        if let Some(sender) = &deferred_sender {
            service = service.with_deferred_sender(sender.clone());
        }

        Self {
            installments: Arc::new(service),
            customers,
            webhooks: WebhookState::new(
                config.webhook.secret.clone(),
                config.webhook.tolerance_secs,
            ),
            deferred_sender,
        }
    }

    /// Register state and routes: `/`, `/health`, `/ready`,
    /// `/create-installment-plan`, `/webhook`
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.installments.clone()))
            .app_data(web::Data::new(self.customers.clone()))
            .app_data(web::Data::new(self.webhooks.clone()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .configure(pages::configure)
            .configure(health::configure_with_readiness)
            .configure(installments::configure)
            .configure(webhooks::controllers::configure);
    }
}

/// Register state and routes of the standalone receiver: `/health`, `/webhook`
pub fn configure_receiver(state: WebhookState) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(state.clone()))
            .configure(health::configure)
            .configure(webhooks::controllers::configure_receiver);
    }
}
