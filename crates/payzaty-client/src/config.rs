//! # Payzaty Configuration
//!
//! Endpoint selection and environment loading for the Payzaty gateway.
//! Credentials live in the host settings store (`GatewaySettings`) and
//! are re-read on every call; this module only fixes the endpoints, the
//! checkout language, and the client timeout.

use payzaty_core::{GatewaySettings, PaymentError, PaymentResult};
use std::env;
use std::time::Duration;

/// Production gateway base URL
pub const PRODUCTION_BASE_URL: &str = "https://api.payzaty.com";

/// Sandbox gateway base URL
pub const SANDBOX_BASE_URL: &str = "https://api.sandbox.payzaty.com";

/// Fixed country calling code prefixed to stored phone numbers
pub const COUNTRY_CALLING_CODE: &str = "+966";

/// Static Payzaty client configuration
#[derive(Debug, Clone)]
pub struct PayzatyConfig {
    /// Base URL used when settings select the live environment
    pub production_base_url: String,

    /// Base URL used when settings select the sandbox
    pub sandbox_base_url: String,

    /// Checkout page language code sent in the initiation payload
    pub language: String,

    /// Bound on every outbound gateway call
    pub timeout: Duration,
}

impl PayzatyConfig {
    /// Resolve the base URL for the environment the settings select
    pub fn base_url(&self, use_sandbox: bool) -> &str {
        if use_sandbox {
            &self.sandbox_base_url
        } else {
            &self.production_base_url
        }
    }

    /// Checkout initiation endpoint
    pub fn checkout_url(&self, use_sandbox: bool) -> String {
        format!("{}/checkout", self.base_url(use_sandbox))
    }

    /// Status-poll endpoint for a checkout session
    pub fn status_url(&self, use_sandbox: bool, checkout_id: &str) -> String {
        format!("{}/checkout/{}", self.base_url(use_sandbox), checkout_id)
    }

    /// Builder: point both environments at a custom base URL (for testing)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url: String = url.into();
        self.production_base_url = url.clone();
        self.sandbox_base_url = url;
        self
    }

    /// Builder: set the checkout language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

impl Default for PayzatyConfig {
    fn default() -> Self {
        Self {
            production_base_url: PRODUCTION_BASE_URL.to_string(),
            sandbox_base_url: SANDBOX_BASE_URL.to_string(),
            language: "en".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Load gateway settings from environment variables.
///
/// Required env vars:
/// - `PAYZATY_ACCOUNT_NO`
/// - `PAYZATY_SECRET_KEY`
///
/// Optional:
/// - `PAYZATY_USE_SANDBOX` (defaults to true)
pub fn settings_from_env() -> PaymentResult<GatewaySettings> {
    dotenvy::dotenv().ok(); // Load .env file if present

    let account_no = env::var("PAYZATY_ACCOUNT_NO")
        .map_err(|_| PaymentError::Configuration("PAYZATY_ACCOUNT_NO not set".to_string()))?;

    let secret_key = env::var("PAYZATY_SECRET_KEY")
        .map_err(|_| PaymentError::Configuration("PAYZATY_SECRET_KEY not set".to_string()))?;

    if account_no.trim().is_empty() {
        return Err(PaymentError::Configuration(
            "PAYZATY_ACCOUNT_NO must not be empty".to_string(),
        ));
    }

    if secret_key.trim().is_empty() {
        return Err(PaymentError::Configuration(
            "PAYZATY_SECRET_KEY must not be empty".to_string(),
        ));
    }

    let use_sandbox = env::var("PAYZATY_USE_SANDBOX")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(true);

    Ok(GatewaySettings {
        use_sandbox,
        account_no,
        secret_key,
    })
}
