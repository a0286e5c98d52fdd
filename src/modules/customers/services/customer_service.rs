use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::core::Result;
use crate::modules::customers::{models::CustomerRecord, repositories::CustomerRepository};
use crate::modules::gateways::{NewCustomer, PaymentProcessor};

/// Description attached to every customer this service creates
pub const CUSTOMER_DESCRIPTION: &str = "Customer for installment plan";

/// Resolves an email address to a processor-side customer id
pub struct CustomerService {
    repository: Arc<dyn CustomerRepository>,
    processor: Arc<dyn PaymentProcessor>,
    // One lock per email with a creation in flight; held across re-check,
    // remote create and insert.
    creations: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl CustomerService {
    pub fn new(
        repository: Arc<dyn CustomerRepository>,
        processor: Arc<dyn PaymentProcessor>,
    ) -> Self {
        Self {
            repository,
            processor,
            creations: Mutex::new(HashMap::new()),
        }
    }

    /// Return the stored customer id for `email`, creating the customer on a miss
    ///
    /// No format validation is applied to `email`. Directory hits never wait
    /// on a remote call; misses for the same email are serialized so only one
    /// remote customer is created. Processor and storage failures propagate
    /// unchanged.
    pub async fn resolve(&self, email: &str) -> Result<String> {
        if let Some(existing) = self.repository.find_by_email(email).await? {
            return Ok(existing.external_id);
        }

        let lock = self.creation_lock(email).await;
        let result = {
            let _guard = lock.lock().await;
            self.create_if_absent(email).await
        };
        self.release_creation_lock(email, lock).await;

        result
    }

    async fn create_if_absent(&self, email: &str) -> Result<String> {
        // Another request may have created it while we waited
        if let Some(existing) = self.repository.find_by_email(email).await? {
            return Ok(existing.external_id);
        }

        let customer = self
            .processor
            .create_customer(NewCustomer {
                email: email.to_string(),
                description: CUSTOMER_DESCRIPTION.to_string(),
            })
            .await?;

        self.repository
            .insert(CustomerRecord::new(customer.id.clone(), email))
            .await?;

        info!(
            customer_id = customer.id.as_str(),
            processor = self.processor.name(),
            "Created customer"
        );

        Ok(customer.id)
    }

    async fn creation_lock(&self, email: &str) -> Arc<Mutex<()>> {
        let mut creations = self.creations.lock().await;
        creations.entry(email.to_string()).or_default().clone()
    }

    async fn release_creation_lock(&self, email: &str, lock: Arc<Mutex<()>>) {
        let mut creations = self.creations.lock().await;
        // Only the map and this handle left: nobody else is waiting
        if Arc::strong_count(&lock) <= 2 {
            creations.remove(email);
        }
    }
}
