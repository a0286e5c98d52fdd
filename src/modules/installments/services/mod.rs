pub mod deferred_sender;
pub mod installment_calculator;
pub mod installment_service;

pub use deferred_sender::{DeferredInvoice, DeferredInvoiceSender};
pub use installment_calculator::InstallmentCalculator;
pub use installment_service::{InstallmentService, PlanOptions};
