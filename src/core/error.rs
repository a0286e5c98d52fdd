use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::fmt;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Result of a single call against the payment processor
pub type ProcessorResult<T> = std::result::Result<T, ProcessorError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Validation errors for business rules
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database operation errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Payment processor errors
    #[error(transparent)]
    Processor(#[from] ProcessorError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": self.client_message(),
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            // Remote failures are reported to the caller as a bad request
            AppError::Processor(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    /// Message suitable for the `error` field of a JSON response.
    ///
    /// Validation messages are returned without the variant prefix so callers
    /// see exactly the rule that was broken.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Processor operation a [`ProcessorError`] originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOperation {
    CreateCustomer,
    CreateInvoice,
    CreateInvoiceItem,
    SendInvoice,
    VoidInvoice,
    DeleteInvoice,
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RemoteOperation::CreateCustomer => "create customer",
            RemoteOperation::CreateInvoice => "create invoice",
            RemoteOperation::CreateInvoiceItem => "create invoice item",
            RemoteOperation::SendInvoice => "send invoice",
            RemoteOperation::VoidInvoice => "void invoice",
            RemoteOperation::DeleteInvoice => "delete invoice",
        };
        f.write_str(name)
    }
}

/// Typed failure of one remote call
#[derive(thiserror::Error, Debug)]
pub enum ProcessorError {
    /// The request never produced an HTTP response
    #[error("{operation} failed: {source}")]
    Transport {
        operation: RemoteOperation,
        #[source]
        source: reqwest::Error,
    },

    /// The processor answered with a non-success status
    #[error("{message}")]
    Api {
        operation: RemoteOperation,
        status: u16,
        message: String,
    },

    /// The processor answered 2xx with a body we could not read
    #[error("{operation} returned an unreadable response: {source}")]
    Decode {
        operation: RemoteOperation,
        #[source]
        source: reqwest::Error,
    },
}

impl ProcessorError {
    pub fn operation(&self) -> RemoteOperation {
        match self {
            ProcessorError::Transport { operation, .. }
            | ProcessorError::Api { operation, .. }
            | ProcessorError::Decode { operation, .. } => *operation,
        }
    }

    pub fn api(operation: RemoteOperation, status: u16, message: impl Into<String>) -> Self {
        ProcessorError::Api {
            operation,
            status,
            message: message.into(),
        }
    }
}
