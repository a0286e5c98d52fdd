// Installment plan orchestration
//
// Implements:
// - Customer resolution before any invoice is created
// - Two invoices split 50/50, first sent immediately, second deferred
// - Compensation when a later remote call fails: sent invoices are voided,
//   drafts deleted, newest first

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::config::InstallmentSettings;
use crate::core::{ProcessorResult, Result};
use crate::modules::customers::CustomerService;
use crate::modules::gateways::{
    CollectionMethod, InvoiceDraft, InvoiceItemDraft, PaymentProcessor,
};
use crate::modules::installments::{
    models::{CreateInstallmentPlanRequest, Dispatch, InstallmentPlan, InstallmentSchedule},
    services::{DeferredInvoiceSender, InstallmentCalculator},
};

/// Tunables for plan creation
#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub currency: String,
    pub second_days_until_due: u32,
    /// Delay before the deferred sender sends the second invoice
    pub send_after: chrono::Duration,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            currency: "usd".to_string(),
            second_days_until_due: 45,
            send_after: chrono::Duration::days(45),
        }
    }
}

impl From<&InstallmentSettings> for PlanOptions {
    fn from(settings: &InstallmentSettings) -> Self {
        Self {
            currency: settings.currency.to_lowercase(),
            second_days_until_due: settings.second_days_until_due,
            send_after: chrono::Duration::days(settings.deferred_send.send_after_days as i64),
        }
    }
}

/// Invoice created during the current request
#[derive(Debug, Clone)]
struct CreatedInvoice {
    id: String,
    sent: bool,
}

/// Service for installment plan business logic
pub struct InstallmentService {
    customers: Arc<CustomerService>,
    processor: Arc<dyn PaymentProcessor>,
    deferred: Option<Arc<DeferredInvoiceSender>>,
    options: PlanOptions,
}

impl InstallmentService {
    pub fn new(
        customers: Arc<CustomerService>,
        processor: Arc<dyn PaymentProcessor>,
        options: PlanOptions,
    ) -> Self {
        Self {
            customers,
            processor,
            deferred: None,
            options,
        }
    }

    /// Hand deferred invoices to `sender` instead of relying on the processor
    pub fn with_deferred_sender(mut self, sender: Arc<DeferredInvoiceSender>) -> Self {
        self.deferred = Some(sender);
        self
    }

    /// Create a two-part installment plan
    ///
    /// # Business Rules
    /// - Totals below one cent are rejected before any remote call
    /// - Each installment is floor(total / 2); odd remainders are dropped
    /// - The first invoice is due immediately and sent now
    /// - The second invoice is due later, auto-advance disabled, not sent now
    pub async fn create_plan(&self, request: CreateInstallmentPlanRequest) -> Result<InstallmentPlan> {
        InstallmentCalculator::validate_total(request.amount)?;

        let customer_id = self.customers.resolve(&request.email).await?;

        let schedules = InstallmentCalculator::calculate_schedules(
            request.amount,
            self.options.second_days_until_due,
        )?;

        info!(
            customer_id = customer_id.as_str(),
            total = request.amount,
            installment_count = schedules.len(),
            "Creating installment plan"
        );

        let mut created: Vec<CreatedInvoice> = Vec::with_capacity(schedules.len());
        let mut invoice_ids = Vec::with_capacity(schedules.len());

        for schedule in &schedules {
            match self
                .issue_installment(&customer_id, &request.description, schedule, &mut created)
                .await
            {
                Ok(invoice_id) => invoice_ids.push(invoice_id),
                Err(e) => {
                    error!(
                        customer_id = customer_id.as_str(),
                        installment_number = schedule.installment_number,
                        operation = %e.operation(),
                        error = %e,
                        "Installment plan creation failed"
                    );
                    self.compensate(&created).await;
                    return Err(e.into());
                }
            }
        }

        if let Some(sender) = &self.deferred {
            let send_at = Utc::now() + self.options.send_after;
            for (schedule, invoice_id) in schedules.iter().zip(&invoice_ids) {
                if schedule.dispatch == Dispatch::Deferred {
                    sender.defer(invoice_id.clone(), send_at).await;
                }
            }
        }

        let plan = InstallmentPlan {
            customer_id,
            first_invoice: invoice_ids[0].clone(),
            second_invoice: invoice_ids[1].clone(),
            amount_per_installment: schedules[0].amount,
        };

        info!(
            first_invoice = plan.first_invoice.as_str(),
            second_invoice = plan.second_invoice.as_str(),
            amount_per_installment = plan.amount_per_installment,
            "Installment plan created"
        );

        Ok(plan)
    }

    /// Create one invoice, attach its line item and send it if due now
    async fn issue_installment(
        &self,
        customer_id: &str,
        description: &str,
        schedule: &InstallmentSchedule,
        created: &mut Vec<CreatedInvoice>,
    ) -> ProcessorResult<String> {
        let invoice = self
            .processor
            .create_invoice(InvoiceDraft {
                customer: customer_id.to_string(),
                collection_method: CollectionMethod::SendInvoice,
                days_until_due: schedule.days_until_due,
                description: schedule.invoice_description(description),
                auto_advance: schedule.auto_advance(),
            })
            .await?;

        created.push(CreatedInvoice {
            id: invoice.id.clone(),
            sent: false,
        });

        self.processor
            .create_invoice_item(InvoiceItemDraft {
                customer: customer_id.to_string(),
                amount: schedule.amount,
                currency: self.options.currency.clone(),
                description: schedule.line_item_description(description),
                invoice: invoice.id.clone(),
            })
            .await?;

        if schedule.dispatch == Dispatch::SendNow {
            self.processor.send_invoice(&invoice.id).await?;
            if let Some(last) = created.last_mut() {
                last.sent = true;
            }
        }

        Ok(invoice.id)
    }

    /// Roll back invoices created before a failure, newest first
    async fn compensate(&self, created: &[CreatedInvoice]) {
        for invoice in created.iter().rev() {
            let result = if invoice.sent {
                self.processor.void_invoice(&invoice.id).await.map(|_| ())
            } else {
                self.processor.delete_invoice(&invoice.id).await
            };

            match result {
                Ok(()) => info!(
                    invoice_id = invoice.id.as_str(),
                    voided = invoice.sent,
                    "Rolled back installment invoice"
                ),
                Err(e) => warn!(
                    invoice_id = invoice.id.as_str(),
                    error = %e,
                    "Failed to roll back installment invoice"
                ),
            }
        }
    }
}
