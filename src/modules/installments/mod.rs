pub mod controllers;
pub mod models;
pub mod services;

pub use controllers::configure;
pub use models::{CreateInstallmentPlanRequest, InstallmentPlan, InstallmentSchedule};
pub use services::{DeferredInvoiceSender, InstallmentCalculator, InstallmentService, PlanOptions};
