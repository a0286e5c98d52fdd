use crate::core::ProcessorResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Remote payment processor holding customers and invoices
///
/// Every method maps to exactly one remote call; no retries happen here.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Create a customer record on the processor side
    async fn create_customer(&self, request: NewCustomer) -> ProcessorResult<ProcessorCustomer>;

    /// Create an invoice (draft) for a customer
    async fn create_invoice(&self, request: InvoiceDraft) -> ProcessorResult<ProcessorInvoice>;

    /// Attach a line item to an invoice
    async fn create_invoice_item(
        &self,
        request: InvoiceItemDraft,
    ) -> ProcessorResult<ProcessorInvoiceItem>;

    /// Finalize and email an invoice to its customer
    async fn send_invoice(&self, invoice_id: &str) -> ProcessorResult<ProcessorInvoice>;

    /// Void a finalized invoice
    async fn void_invoice(&self, invoice_id: &str) -> ProcessorResult<ProcessorInvoice>;

    /// Delete a draft invoice
    async fn delete_invoice(&self, invoice_id: &str) -> ProcessorResult<()>;

    /// Get processor name
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCustomer {
    pub email: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionMethod {
    /// Customer is emailed the invoice and pays it manually
    SendInvoice,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceDraft {
    pub customer: String,
    pub collection_method: CollectionMethod,
    pub days_until_due: u32,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_advance: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceItemDraft {
    pub customer: String,
    /// Minor currency units
    pub amount: i64,
    pub currency: String,
    pub description: String,
    pub invoice: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProcessorCustomer {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProcessorInvoice {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProcessorInvoiceItem {
    pub id: String,
    #[serde(default)]
    pub invoice: Option<String>,
}
