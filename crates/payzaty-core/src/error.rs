//! # Payment Error Types
//!
//! Typed error handling for the Payzaty checkout integration.
//! All payment operations return `Result<T, PaymentError>`. Network and
//! parse failures are converted at the gateway-client boundary; nothing
//! here is allowed to unwind through the host request pipeline.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing credentials, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Order not found in the host's order store
    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: u64 },

    /// Gateway returned a non-success status or an error body
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with the gateway
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Initiation response carried no checkout URL to redirect to
    #[error("Checkout creation failed: {0}")]
    CheckoutCreationFailed(String),

    /// Gateway response body could not be interpreted
    #[error("Malformed gateway response: {0}")]
    MalformedResponse(String),

    /// Operation the gateway does not support (capture, refund, ...)
    #[error("Operation not supported by {provider}: {operation}")]
    UnsupportedOperation {
        provider: String,
        operation: &'static str,
    },

    /// No settings saved for the requested store scope
    #[error("No gateway settings for store scope {scope}")]
    SettingsNotFound { scope: u64 },

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaymentError {
    /// Returns true if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PaymentError::NetworkError(_) | PaymentError::ProviderError { .. }
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Configuration(_) => 500,
            PaymentError::InvalidRequest(_) => 400,
            PaymentError::OrderNotFound { .. } => 404,
            PaymentError::ProviderError { .. } => 502,
            PaymentError::NetworkError(_) => 503,
            PaymentError::CheckoutCreationFailed(_) => 502,
            PaymentError::MalformedResponse(_) => 502,
            PaymentError::UnsupportedOperation { .. } => 501,
            PaymentError::SettingsNotFound { .. } => 500,
            PaymentError::Internal(_) => 500,
            PaymentError::Serialization(_) => 500,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
