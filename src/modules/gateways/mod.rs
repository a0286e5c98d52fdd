pub mod services;

pub use services::{
    CollectionMethod, InvoiceDraft, InvoiceItemDraft, NewCustomer, PaymentProcessor,
    ProcessorCustomer, ProcessorInvoice, ProcessorInvoiceItem, StripeClient,
};
