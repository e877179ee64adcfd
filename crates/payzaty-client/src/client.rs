//! # Payzaty Gateway Client
//!
//! The two HTTP calls against the Payzaty REST API: checkout initiation
//! and status polling. Both authenticate with the `X-AccountNo` and
//! `X-SecretKey` headers, loaded from the host settings store on every
//! call so an admin change takes effect immediately. Every failure mode
//! (transport, non-2xx, malformed body) comes back as a typed error.

use crate::config::PayzatyConfig;
use crate::request::CheckoutRequest;
use chrono::Utc;
use payzaty_core::{
    CallbackUrls, CheckoutSession, GatewaySettings, GatewayStatus, Order, PaymentError,
    PaymentGateway, PaymentResult, SettingsStore, StoreScope,
};
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "payzaty";

/// Payzaty hosted-checkout gateway
pub struct PayzatyGateway {
    config: PayzatyConfig,
    settings: Arc<dyn SettingsStore>,
    scope: StoreScope,
    client: Client,
}

impl PayzatyGateway {
    /// Create a gateway client for a store scope
    pub fn new(config: PayzatyConfig, settings: Arc<dyn SettingsStore>, scope: StoreScope) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            settings,
            scope,
            client,
        }
    }

    /// Settings are never cached: loaded fresh for every gateway call
    async fn current_settings(&self) -> PaymentResult<GatewaySettings> {
        self.settings.load(self.scope).await
    }
}

#[async_trait::async_trait]
impl PaymentGateway for PayzatyGateway {
    #[instrument(skip(self, order, urls), fields(order_id = %order.id))]
    async fn create_checkout(
        &self,
        order: &Order,
        urls: &CallbackUrls,
    ) -> PaymentResult<CheckoutSession> {
        let settings = self.current_settings().await?;

        let request = CheckoutRequest::from_order(
            order,
            &self.config.language,
            urls.success_url(),
            urls.cancel_url(),
        );

        debug!(
            "Initiating checkout: amount={} {}, reference={}",
            request.amount, request.currency, request.reference
        );

        let url = self.config.checkout_url(settings.use_sandbox);

        let response = self
            .client
            .post(&url)
            .header("X-AccountNo", &settings.account_no)
            .header("X-SecretKey", &settings.secret_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Payzaty API error: status={}, body={}", status, body);
            return Err(PaymentError::ProviderError {
                provider: PROVIDER.to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let initiation: InitiateResponse = serde_json::from_str(&body).map_err(|e| {
            PaymentError::MalformedResponse(format!("Failed to parse initiation response: {}", e))
        })?;

        // A 2xx response without a checkout URL leaves the shopper with
        // nowhere to be redirected.
        let checkout_url = initiation.checkout_url.ok_or_else(|| {
            PaymentError::CheckoutCreationFailed(
                "initiation response carried no checkout_url".to_string(),
            )
        })?;

        info!(
            "Created checkout session: reference={}, url={}",
            request.reference, checkout_url
        );

        Ok(CheckoutSession {
            provider: PROVIDER.to_string(),
            order_id: order.id,
            checkout_url,
            reference: initiation.reference,
            created_at: Utc::now(),
        })
    }

    #[instrument(skip(self))]
    async fn checkout_status(&self, checkout_id: &str) -> PaymentResult<GatewayStatus> {
        let settings = self.current_settings().await?;

        let url = self.config.status_url(settings.use_sandbox, checkout_id);

        let response = self
            .client
            .get(&url)
            .header("X-AccountNo", &settings.account_no)
            .header("X-SecretKey", &settings.secret_key)
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Payzaty API error: status={}, body={}", status, body);
            return Err(PaymentError::ProviderError {
                provider: PROVIDER.to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let raw: StatusResponse = serde_json::from_str(&body).map_err(|e| {
            PaymentError::MalformedResponse(format!("Failed to parse status response: {}", e))
        })?;

        // `reference` joins the session back to the order, so a terminal
        // status without it is unusable.
        if raw.paid.is_some() && raw.reference.is_none() {
            return Err(PaymentError::MalformedResponse(
                "status response has paid but no reference".to_string(),
            ));
        }

        debug!(
            "Checkout status: checkout_id={}, paid={:?}, reference={:?}",
            checkout_id, raw.paid, raw.reference
        );

        Ok(GatewayStatus {
            paid: raw.paid,
            reference: raw.reference,
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Payzaty API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct InitiateResponse {
    #[serde(default)]
    checkout_url: Option<String>,
    #[serde(default)]
    reference: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    /// The gateway has been observed sending both JSON booleans and the
    /// strings "True"/"False"
    #[serde(default, deserialize_with = "deserialize_paid")]
    paid: Option<bool>,
    #[serde(default)]
    reference: Option<String>,
}

fn deserialize_paid<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Bool(b)) => Ok(Some(b)),
        Some(serde_json::Value::String(s)) => match s.to_ascii_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            other => Err(D::Error::custom(format!(
                "unrecognized paid value: {}",
                other
            ))),
        },
        Some(other) => Err(D::Error::custom(format!(
            "paid must be a boolean or string, got {}",
            other
        ))),
    }
}
