use super::gateway_trait::{
    InvoiceDraft, InvoiceItemDraft, NewCustomer, PaymentProcessor, ProcessorCustomer,
    ProcessorInvoice, ProcessorInvoiceItem,
};
use crate::core::{ProcessorError, ProcessorResult, RemoteOperation};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

/// Stripe REST client
///
/// Implements PaymentProcessor against the Stripe API using form-encoded
/// requests and bearer authentication.
/// API Documentation: https://docs.stripe.com/api
pub struct StripeClient {
    client: Client,
    secret_key: String,
    base_url: String,
}

#[derive(Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Deserialize)]
struct StripeErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

impl StripeClient {
    /// Create a new Stripe client
    ///
    /// # Arguments
    /// * `secret_key` - Stripe secret key (from STRIPE_SECRET_KEY env var)
    /// * `base_url` - API base URL (defaults to https://api.stripe.com)
    pub fn new(secret_key: String, base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| "https://api.stripe.com".to_string());
        Self {
            client: Client::new(),
            secret_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: RemoteOperation,
        request: RequestBuilder,
    ) -> ProcessorResult<T> {
        let response = request
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|source| ProcessorError::Transport { operation, source })?;

        let status = response.status();
        debug!(operation = %operation, status = status.as_u16(), "Stripe responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<StripeErrorBody>(&body)
                .ok()
                .and_then(|b| match (b.error.message, b.error.kind) {
                    (Some(message), _) => Some(message),
                    (None, Some(kind)) => Some(kind),
                    (None, None) => None,
                })
                .unwrap_or_else(|| format!("Stripe API error {} during {}", status, operation));
            return Err(ProcessorError::api(operation, status.as_u16(), message));
        }

        response
            .json()
            .await
            .map_err(|source| ProcessorError::Decode { operation, source })
    }
}

#[derive(Deserialize)]
struct DeletedObject {
    #[allow(dead_code)]
    id: String,
}

#[async_trait]
impl PaymentProcessor for StripeClient {
    async fn create_customer(&self, request: NewCustomer) -> ProcessorResult<ProcessorCustomer> {
        let builder = self.client.post(self.url("customers")).form(&request);
        self.execute(RemoteOperation::CreateCustomer, builder).await
    }

    async fn create_invoice(&self, request: InvoiceDraft) -> ProcessorResult<ProcessorInvoice> {
        let builder = self.client.post(self.url("invoices")).form(&request);
        self.execute(RemoteOperation::CreateInvoice, builder).await
    }

    async fn create_invoice_item(
        &self,
        request: InvoiceItemDraft,
    ) -> ProcessorResult<ProcessorInvoiceItem> {
        let builder = self.client.post(self.url("invoiceitems")).form(&request);
        self.execute(RemoteOperation::CreateInvoiceItem, builder).await
    }

    async fn send_invoice(&self, invoice_id: &str) -> ProcessorResult<ProcessorInvoice> {
        let builder = self
            .client
            .post(self.url(&format!("invoices/{}/send", invoice_id)));
        self.execute(RemoteOperation::SendInvoice, builder).await
    }

    async fn void_invoice(&self, invoice_id: &str) -> ProcessorResult<ProcessorInvoice> {
        let builder = self
            .client
            .post(self.url(&format!("invoices/{}/void", invoice_id)));
        self.execute(RemoteOperation::VoidInvoice, builder).await
    }

    async fn delete_invoice(&self, invoice_id: &str) -> ProcessorResult<()> {
        let builder = self
            .client
            .delete(self.url(&format!("invoices/{}", invoice_id)));
        self.execute::<DeletedObject>(RemoteOperation::DeleteInvoice, builder)
            .await
            .map(|_| ())
    }

    fn name(&self) -> &str {
        "stripe"
    }
}
