//! # payzaty-api
//!
//! HTTP layer for the Payzaty checkout integration.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The two gateway return callbacks (Success/Cancel)
//! - A checkout-initiation endpoint for the storefront
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/v1/checkout` | Initiate a gateway checkout for an order |
//! | GET | `/api/v1/settings` | Current gateway settings |
//! | PUT | `/api/v1/settings` | Replace the gateway settings |
//! | GET | `/Plugins/PaymentPayzaty/Success` | Gateway return callback |
//! | GET | `/Plugins/PaymentPayzaty/Cancel` | Gateway return callback |
//! | GET | `/checkout/completed` | Page the callbacks redirect to |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
