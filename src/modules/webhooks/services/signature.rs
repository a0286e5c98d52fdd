use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::modules::webhooks::models::WebhookEvent;

type HmacSha256 = Hmac<Sha256>;

/// Reasons an inbound webhook is refused
///
/// Endpoints collapse all of these into `{"success": false}`.
#[derive(thiserror::Error, Debug)]
pub enum WebhookError {
    #[error("Invalid payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// Body is valid JSON but not an event
    #[error("Payload is not an event: {0}")]
    InvalidEvent(serde_json::Error),

    #[error("No signatures header provided")]
    MissingHeader,

    #[error("Unable to extract timestamp and signatures from header")]
    MalformedHeader,

    #[error("No signatures found with expected scheme v1")]
    NoSignatures,

    #[error("No signatures found matching the expected signature for payload")]
    SignatureMismatch,

    #[error("Timestamp outside the tolerance zone ({age}s old)")]
    TimestampOutsideTolerance { age: i64 },

    #[error("No webhook signing secret configured")]
    MissingSecret,
}

/// Verifies `Stripe-Signature` headers and builds events from signed payloads
///
/// Header format: `t=<unix seconds>,v1=<hex hmac-sha256>[,v1=...]`. The
/// signed content is `"{t}.{raw body}"`.
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: String,
    tolerance_secs: i64,
}

impl WebhookVerifier {
    pub fn new(secret: impl Into<String>, tolerance_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            tolerance_secs: i64::try_from(tolerance_secs).unwrap_or(i64::MAX),
        }
    }

    /// Parse `payload` and verify it against `header` using the current time
    pub fn construct_event(
        &self,
        payload: &[u8],
        header: Option<&str>,
    ) -> Result<WebhookEvent, WebhookError> {
        self.construct_event_at(payload, header, Utc::now().timestamp())
    }

    /// Same as [`construct_event`](Self::construct_event) with an explicit clock
    pub fn construct_event_at(
        &self,
        payload: &[u8],
        header: Option<&str>,
        now: i64,
    ) -> Result<WebhookEvent, WebhookError> {
        let event: WebhookEvent = serde_json::from_slice(payload)?;
        self.verify_header(payload, header.ok_or(WebhookError::MissingHeader)?, now)?;
        Ok(event)
    }

    /// Check that one of the `v1` signatures in `header` matches `payload`
    pub fn verify_header(&self, payload: &[u8], header: &str, now: i64) -> Result<(), WebhookError> {
        let (timestamp, signatures) = parse_header(header)?;

        let mac = self.mac_for(timestamp, payload);
        let matched = signatures.iter().any(|candidate| {
            hex::decode(candidate)
                .map(|bytes| mac.clone().verify_slice(&bytes).is_ok())
                .unwrap_or(false)
        });
        if !matched {
            return Err(WebhookError::SignatureMismatch);
        }

        let age = now - timestamp;
        if age > self.tolerance_secs {
            return Err(WebhookError::TimestampOutsideTolerance { age });
        }

        Ok(())
    }

    fn mac_for(&self, timestamp: i64, payload: &[u8]) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        mac
    }
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &"<redacted>")
            .field("tolerance_secs", &self.tolerance_secs)
            .finish()
    }
}

fn parse_header(header: &str) -> Result<(i64, Vec<&str>), WebhookError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => timestamp = value.parse::<i64>().ok(),
            "v1" => signatures.push(value),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(WebhookError::MalformedHeader)?;
    if signatures.is_empty() {
        return Err(WebhookError::NoSignatures);
    }

    Ok((timestamp, signatures))
}

/// Build a valid signature header for `payload`, as the processor would
pub fn signature_header(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let verifier = WebhookVerifier::new(secret, 0);
    let signature = hex::encode(verifier.mac_for(timestamp, payload).finalize().into_bytes());
    format!("t={},v1={}", timestamp, signature)
}
