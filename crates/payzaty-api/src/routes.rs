//! # Routes
//!
//! Axum router configuration. The callback paths match what the gateway
//! is told in the initiation payload (`response_url` / `cancel_url`), so
//! they keep the host platform's `/Plugins/PaymentPayzaty/*` shape.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /health - Health check
/// - POST /api/v1/checkout - Initiate a gateway checkout for an order
/// - GET  /api/v1/settings - Current gateway settings
/// - PUT  /api/v1/settings - Replace the gateway settings
/// - GET  /Plugins/PaymentPayzaty/Success?checkoutId= - Return callback
/// - GET  /Plugins/PaymentPayzaty/Cancel?checkoutId= - Return callback
/// - GET  /checkout/completed?orderId= - Completed page
/// - GET  / - Site root (callback fallback)
pub fn create_router(state: AppState) -> Router {
    // The storefront initiates checkouts from the browser
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let callback_routes = Router::new()
        .route("/Success", get(handlers::success_callback))
        .route("/Cancel", get(handlers::cancel_callback));

    let api_routes = Router::new()
        .route("/checkout", post(handlers::create_checkout))
        .route(
            "/settings",
            get(handlers::get_settings).put(handlers::update_settings),
        );

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::home))
        .route("/checkout/completed", get(handlers::checkout_completed))
        .nest("/Plugins/PaymentPayzaty", callback_routes)
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
