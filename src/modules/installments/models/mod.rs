pub mod installment_plan;

pub use installment_plan::{
    CreateInstallmentPlanRequest, Dispatch, InstallmentPlan, InstallmentSchedule,
    DEFAULT_PLAN_AMOUNT, DEFAULT_PLAN_DESCRIPTION,
};
