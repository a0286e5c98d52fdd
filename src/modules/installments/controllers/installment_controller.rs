// HTTP handler for installment plan creation
//
// Endpoints:
// - POST /create-installment-plan - Split a total into two invoices

use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::Result;
use crate::modules::installments::{
    models::{CreateInstallmentPlanRequest, InstallmentPlan},
    services::InstallmentService,
};

/// Response for a created plan
#[derive(Debug, Serialize, Deserialize)]
pub struct InstallmentPlanResponse {
    pub success: bool,
    pub first_invoice: String,
    pub second_invoice: String,
    pub amount_per_installment: i64,
}

impl From<InstallmentPlan> for InstallmentPlanResponse {
    fn from(plan: InstallmentPlan) -> Self {
        Self {
            success: true,
            first_invoice: plan.first_invoice,
            second_invoice: plan.second_invoice,
            amount_per_installment: plan.amount_per_installment,
        }
    }
}

/// POST /create-installment-plan
///
/// # Request Body
/// ```json
/// {"email": "a@b.com", "amount": 1000, "description": "Payment Plan"}
/// ```
/// `amount` (cents) defaults to 1000, `description` to "Payment Plan".
///
/// # Returns
/// - 200: `{success: true, first_invoice, second_invoice, amount_per_installment}`
/// - 400: `{success: false, error}` for validation and processor failures alike
/// - 500: `{success: false, error}` when the customer directory fails
pub async fn create_installment_plan(
    service: web::Data<Arc<InstallmentService>>,
    request: web::Json<CreateInstallmentPlanRequest>,
) -> Result<HttpResponse> {
    let plan = service
        .create_plan(request.into_inner())
        .await
        .inspect_err(|e| warn!(error = %e, "Rejected installment plan request"))?;

    Ok(HttpResponse::Ok().json(InstallmentPlanResponse::from(plan)))
}

/// Configure installment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/create-installment-plan",
        web::post().to(create_installment_plan),
    );
}
