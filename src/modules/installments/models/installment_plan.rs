use serde::{Deserialize, Serialize};

/// Total charged when the request omits `amount` (cents)
pub const DEFAULT_PLAN_AMOUNT: i64 = 1000;

/// Description used when the request omits `description`
pub const DEFAULT_PLAN_DESCRIPTION: &str = "Payment Plan";

/// Body of POST /create-installment-plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInstallmentPlanRequest {
    pub email: String,
    /// Total in minor currency units
    #[serde(default = "default_amount")]
    pub amount: i64,
    #[serde(default = "default_description")]
    pub description: String,
}

fn default_amount() -> i64 {
    DEFAULT_PLAN_AMOUNT
}

fn default_description() -> String {
    DEFAULT_PLAN_DESCRIPTION.to_string()
}

/// Outcome of a successful plan creation; never persisted locally
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallmentPlan {
    pub customer_id: String,
    pub first_invoice: String,
    pub second_invoice: String,
    pub amount_per_installment: i64,
}

/// How an installment invoice leaves draft state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Sent to the customer as part of the request
    SendNow,
    /// Left as a draft with auto-advance disabled; sent later
    Deferred,
}

/// One planned invoice of an installment plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallmentSchedule {
    /// Sequential number (1, 2)
    pub installment_number: u32,
    pub installment_count: u32,
    /// Minor currency units
    pub amount: i64,
    pub days_until_due: u32,
    pub dispatch: Dispatch,
}

impl InstallmentSchedule {
    /// Invoice description, e.g. `Payment Plan - Installment 1 of 2`
    pub fn invoice_description(&self, plan_description: &str) -> String {
        format!(
            "{} - Installment {} of {}",
            plan_description, self.installment_number, self.installment_count
        )
    }

    /// Line item description, e.g. `First installment (50%) - Payment Plan`
    pub fn line_item_description(&self, plan_description: &str) -> String {
        format!(
            "{} installment ({}%) - {}",
            ordinal(self.installment_number),
            100 / self.installment_count.max(1),
            plan_description
        )
    }

    /// `Some(false)` for deferred invoices so the processor does not finalize them
    pub fn auto_advance(&self) -> Option<bool> {
        match self.dispatch {
            Dispatch::SendNow => None,
            Dispatch::Deferred => Some(false),
        }
    }
}

fn ordinal(n: u32) -> String {
    match n {
        1 => "First".to_string(),
        2 => "Second".to_string(),
        3 => "Third".to_string(),
        n => format!("#{}", n),
    }
}
