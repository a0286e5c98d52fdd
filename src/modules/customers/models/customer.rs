use serde::{Deserialize, Serialize};

/// Mapping from an email address to the processor-side customer id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CustomerRecord {
    pub external_id: String,
    pub email: String,
}

impl CustomerRecord {
    pub fn new(external_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            email: email.into(),
        }
    }

    /// Fixture record every fresh directory starts with
    pub fn fixture() -> Self {
        Self::new("cus_123456789", "jenny.rosen@example.com")
    }
}
