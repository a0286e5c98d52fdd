pub mod gateway_trait;
pub mod stripe;

pub use gateway_trait::{
    CollectionMethod, InvoiceDraft, InvoiceItemDraft, NewCustomer, PaymentProcessor,
    ProcessorCustomer, ProcessorInvoice, ProcessorInvoiceItem,
};
pub use stripe::StripeClient;
