//! # Request Handlers
//!
//! Axum request handlers: checkout initiation for the storefront and the
//! two gateway return callbacks. The callbacks share one reconciliation
//! path; which route fired only changes the log line.

use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use payzaty_client::CallbackKind;
use payzaty_core::{
    GatewaySettings, PaymentError, ALL_STORES,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Initiate a checkout for an existing order
#[derive(Debug, Deserialize)]
pub struct CreateCheckoutRequest {
    pub order_id: u64,
}

/// Checkout initiation response
#[derive(Debug, Serialize)]
pub struct CreateCheckoutResponse {
    /// Redirect the shopper here
    pub checkout_url: String,
    pub provider: String,
}

/// Query parameters of the gateway return callbacks
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    /// Gateway-assigned checkout session id
    #[serde(rename = "checkoutId")]
    pub checkout_id: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

fn payment_error_to_response(err: PaymentError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

/// 302 Found, as the host platform issues for payment redirects
fn found(location: &str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "payzaty-checkout",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Initiate a gateway checkout for a stored order
#[instrument(skip(state, request), fields(order_id = request.order_id))]
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(request): Json<CreateCheckoutRequest>,
) -> Result<Json<CreateCheckoutResponse>, (StatusCode, Json<ErrorResponse>)> {
    let order = state
        .orders
        .order_by_id(request.order_id)
        .await
        .map_err(payment_error_to_response)?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(
                    format!("Order not found: {}", request.order_id),
                    404,
                )),
            )
        })?;

    info!(
        "Creating checkout: order={}, total={}",
        order.id,
        order.total.display()
    );

    let session = state
        .gateway
        .create_checkout(&order, &state.urls)
        .await
        .map_err(|e| {
            error!("Failed to create checkout: {}", e);
            payment_error_to_response(e)
        })?;

    Ok(Json(CreateCheckoutResponse {
        checkout_url: session.checkout_url,
        provider: session.provider,
    }))
}

/// Current gateway settings (admin surface)
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<GatewaySettings>, (StatusCode, Json<ErrorResponse>)> {
    state
        .settings
        .load(ALL_STORES)
        .await
        .map(Json)
        .map_err(payment_error_to_response)
}

/// Replace the gateway settings. The gateway client reads the store on
/// every call, so the change applies to the next request.
pub async fn update_settings(
    State(state): State<AppState>,
    Json(settings): Json<GatewaySettings>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state
        .settings
        .save(ALL_STORES, settings)
        .await
        .map_err(payment_error_to_response)?;

    info!("Gateway settings updated");
    Ok(StatusCode::NO_CONTENT)
}

/// Gateway return callback after payment ("success" entry point)
pub async fn success_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    callback(&state, query, CallbackKind::Success).await
}

/// Gateway return callback after cancel ("cancel" entry point)
pub async fn cancel_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    callback(&state, query, CallbackKind::Cancel).await
}

/// One reconciliation path for both callbacks
#[instrument(skip(state, query), fields(callback = kind.as_str()))]
async fn callback(state: &AppState, query: CallbackQuery, kind: CallbackKind) -> Response {
    let Some(checkout_id) = query.checkout_id.filter(|id| !id.is_empty()) else {
        info!("Callback without checkoutId, redirecting home");
        return found("/");
    };

    let outcome = state.reconciler().resolve(&checkout_id, kind).await;
    found(&outcome.redirect_path())
}

/// Page the callbacks redirect to after a resolved checkout
pub async fn checkout_completed(
    Query(params): Query<std::collections::HashMap<String, String>>,
) -> impl IntoResponse {
    let order_id = params.get("orderId").map(|s| s.as_str()).unwrap_or("unknown");
    Html(format!(
        r#"
<!DOCTYPE html>
<html>
<head><title>Order Complete</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0;">
    <div style="padding: 60px; border-radius: 16px; text-align: center;">
        <h1>Thank you!</h1>
        <p>Order: <code>{}</code></p>
        <p style="color: #666;">Check the order details page for the payment result.</p>
    </div>
</body>
</html>
"#,
        order_id
    ))
}

/// Site root the callbacks fall back to
pub async fn home() -> impl IntoResponse {
    Html(
        r#"
<!DOCTYPE html>
<html>
<head><title>Store</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0;">
    <div style="padding: 60px; border-radius: 16px; text-align: center;">
        <h1>Store Home</h1>
    </div>
</body>
</html>
"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error", 400);
        assert_eq!(err.error, "Test error");
        assert_eq!(err.code, 400);
    }

    #[test]
    fn test_payment_error_conversion() {
        let err = PaymentError::InvalidRequest("Bad data".to_string());
        let (status, _json) = payment_error_to_response(err);
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let err = PaymentError::UnsupportedOperation {
            provider: "payzaty".to_string(),
            operation: "refund",
        };
        let (status, _json) = payment_error_to_response(err);
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    }

    #[test]
    fn test_found_redirect() {
        let response = found("/checkout/completed?orderId=42");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/checkout/completed?orderId=42"
        );
    }
}
