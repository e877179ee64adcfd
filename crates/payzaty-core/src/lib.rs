//! # payzaty-core
//!
//! Core types and host-facing traits for the Payzaty checkout integration.
//!
//! This crate provides:
//! - `PaymentGateway` trait implemented by the Payzaty client
//! - `Order`, `OrderNote`, and `BillingAddress` for the host's order model
//! - `Price` and `Currency` for minor-unit money handling
//! - `OrderStore`, `SettingsStore`, and `LocaleStore` traits the host
//!   platform fulfils, plus in-memory implementations for tests and demos
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use payzaty_core::{CallbackUrls, Order, PaymentGateway};
//!
//! let urls = CallbackUrls::new("https://shop.example.com");
//!
//! // Create a checkout session with whichever gateway is configured
//! let session = gateway.create_checkout(&order, &urls).await?;
//!
//! // Redirect the shopper to session.checkout_url
//! ```

pub mod error;
pub mod gateway;
pub mod host;
pub mod memory;
pub mod money;
pub mod order;

// Re-exports for convenience
pub use error::{PaymentError, PaymentResult};
pub use gateway::{
    BoxedPaymentGateway, CallbackUrls, CheckoutSession, GatewayStatus, PaymentGateway,
};
pub use host::{GatewaySettings, LocaleStore, OrderStore, SettingsStore, StoreScope, ALL_STORES};
pub use memory::{InMemoryLocaleStore, InMemoryOrderStore, InMemorySettingsStore};
pub use money::{Currency, Price};
pub use order::{BillingAddress, Order, OrderNote, OrderPaymentStatus};
