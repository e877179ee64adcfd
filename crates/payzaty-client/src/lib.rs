//! # payzaty-client
//!
//! Payzaty hosted-checkout gateway client.
//!
//! Payzaty is a one-shot redirect gateway: the integration POSTs a
//! checkout-initiation payload, redirects the shopper to the returned
//! hosted payment page, and later polls the checkout session by id to
//! learn whether the payment went through. There are no webhooks and no
//! capture/refund/void operations.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use payzaty_client::{PayzatyConfig, PayzatyGateway};
//! use payzaty_core::{CallbackUrls, PaymentGateway, ALL_STORES};
//!
//! let gateway = PayzatyGateway::new(PayzatyConfig::default(), settings_store, ALL_STORES);
//!
//! let urls = CallbackUrls::new("https://shop.example.com");
//! let session = gateway.create_checkout(&order, &urls).await?;
//!
//! // Redirect the shopper to session.checkout_url
//! ```
//!
//! ## Return Callbacks
//!
//! Both the Success and Cancel callbacks run the identical
//! poll-and-reconcile sequence:
//!
//! ```rust,ignore
//! use payzaty_client::{CallbackKind, Reconciler};
//!
//! let reconciler = Reconciler::new(gateway, order_store);
//! let outcome = reconciler.resolve(&checkout_id, CallbackKind::Cancel).await;
//! // 302 to outcome.redirect_path()
//! ```

pub mod client;
pub mod config;
pub mod lifecycle;
pub mod reconcile;
pub mod request;

// Re-exports
pub use client::PayzatyGateway;
pub use config::{settings_from_env, PayzatyConfig};
pub use lifecycle::{install, uninstall, RESOURCE_PREFIX};
pub use reconcile::{CallbackKind, CallbackOutcome, Reconciler, PAYMENT_FAILED_NOTE};
pub use request::{CheckoutCustomer, CheckoutRequest};
