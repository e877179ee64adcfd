//! # Payzaty Checkout
//!
//! Redirect-based payment integration for the Payzaty gateway.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables (or provide config/payzaty.toml)
//! export PAYZATY_ACCOUNT_NO=...
//! export PAYZATY_SECRET_KEY=...
//! export PAYZATY_USE_SANDBOX=true
//!
//! # Run the server
//! payzaty-checkout
//! ```

use payzaty_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state (runs the plugin install step)
    let state = AppState::new().await?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.gateway.provider_name());
    info!("Callback base: {}", state.urls.base_url);

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("Payzaty checkout starting on http://{}", addr);

    if !is_prod {
        info!("Checkout: POST http://{}/api/v1/checkout", addr);
        info!(
            "Callbacks: GET http://{}/Plugins/PaymentPayzaty/{{Success,Cancel}}",
            addr
        );
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
