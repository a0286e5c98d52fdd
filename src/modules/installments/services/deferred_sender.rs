use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::time::interval;
use tracing::{error, info};

use crate::modules::gateways::PaymentProcessor;

/// Draft invoice waiting to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredInvoice {
    pub invoice_id: String,
    pub send_at: DateTime<Utc>,
}

/// Background job sending deferred installment invoices once they are due
///
/// The queue lives in memory only: invoices deferred before a restart are
/// left to the processor's own automation.
pub struct DeferredInvoiceSender {
    processor: Arc<dyn PaymentProcessor>,
    pending: Mutex<Vec<DeferredInvoice>>,
    tick: Duration,
}

impl DeferredInvoiceSender {
    pub fn new(processor: Arc<dyn PaymentProcessor>, tick: Duration) -> Self {
        Self {
            processor,
            pending: Mutex::new(Vec::new()),
            tick,
        }
    }

    /// Queue `invoice_id` to be sent at `send_at`
    pub async fn defer(&self, invoice_id: impl Into<String>, send_at: DateTime<Utc>) {
        let invoice = DeferredInvoice {
            invoice_id: invoice_id.into(),
            send_at,
        };
        info!(
            invoice_id = invoice.invoice_id.as_str(),
            send_at = %invoice.send_at,
            "Deferred installment invoice"
        );
        self.pending.lock().await.push(invoice);
    }

    pub async fn pending(&self) -> Vec<DeferredInvoice> {
        self.pending.lock().await.clone()
    }

    /// Start the background sender
    /// This should be spawned as a tokio task in main.rs
    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.tick.as_secs(),
            "Starting deferred installment sender"
        );

        let mut ticker = interval(self.tick);

        loop {
            ticker.tick().await;

            let sent = self.send_due(Utc::now()).await;
            if sent > 0 {
                info!(sent_count = sent, "Deferred invoices sent");
            }
        }
    }

    /// Send every queued invoice whose send time is at or before `now`
    ///
    /// Each due invoice gets one attempt; a failed send is logged and dropped
    /// from the queue. Returns the number sent.
    pub async fn send_due(&self, now: DateTime<Utc>) -> usize {
        let due: Vec<DeferredInvoice> = {
            let mut pending = self.pending.lock().await;
            let (due, waiting): (Vec<_>, Vec<_>) =
                pending.drain(..).partition(|i| i.send_at <= now);
            *pending = waiting;
            due
        };

        let mut sent = 0;

        for invoice in due {
            match self.processor.send_invoice(&invoice.invoice_id).await {
                Ok(_) => {
                    info!(invoice_id = invoice.invoice_id.as_str(), "Sent deferred invoice");
                    sent += 1;
                }
                Err(e) => error!(
                    invoice_id = invoice.invoice_id.as_str(),
                    operation = %e.operation(),
                    error = %e,
                    "Failed to send deferred invoice, dropped from queue"
                ),
            }
        }

        sent
    }
}
