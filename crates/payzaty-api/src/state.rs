//! # Application State
//!
//! Shared state for the Axum application: the gateway client, the host
//! stores (in-memory for the demo binary), and callback URL derivation.

use payzaty_client::{install, settings_from_env, PayzatyConfig, PayzatyGateway, Reconciler};
use payzaty_core::{
    BoxedPaymentGateway, CallbackUrls, GatewaySettings, InMemoryLocaleStore, InMemoryOrderStore,
    InMemorySettingsStore, LocaleStore, OrderStore, SettingsStore, ALL_STORES,
};
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL the gateway redirects the shopper back to
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment gateway client
    pub gateway: BoxedPaymentGateway,
    /// Order persistence
    pub orders: Arc<dyn OrderStore>,
    /// Gateway settings storage
    pub settings: Arc<dyn SettingsStore>,
    /// Locale resources seeded at install
    pub locales: Arc<dyn LocaleStore>,
    /// Callback URLs derived from the store base URL
    pub urls: CallbackUrls,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create an AppState with in-memory stores and the Payzaty gateway.
    ///
    /// Runs the plugin install step (default settings plus locale
    /// resources), then overlays the configured settings on top.
    pub async fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let urls = CallbackUrls::new(&config.base_url);

        let settings_store = Arc::new(InMemorySettingsStore::new());
        let locales = Arc::new(InMemoryLocaleStore::new());
        install(settings_store.as_ref(), locales.as_ref()).await?;
        settings_store.save(ALL_STORES, load_settings()?).await?;

        let orders = Arc::new(InMemoryOrderStore::new());

        let gateway = Arc::new(PayzatyGateway::new(
            PayzatyConfig::default(),
            settings_store.clone(),
            ALL_STORES,
        ));

        Ok(Self {
            gateway,
            orders,
            settings: settings_store,
            locales,
            urls,
            config,
        })
    }

    /// Assemble a state from explicit parts (tests inject mock gateways)
    pub fn with_parts(
        gateway: BoxedPaymentGateway,
        orders: Arc<dyn OrderStore>,
        settings: Arc<dyn SettingsStore>,
        urls: CallbackUrls,
    ) -> Self {
        Self {
            gateway,
            orders,
            settings,
            locales: Arc::new(InMemoryLocaleStore::new()),
            urls,
            config: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                base_url: "http://localhost".to_string(),
                environment: "test".to_string(),
            },
        }
    }

    /// Reconciler wired to this state's gateway and order store
    pub fn reconciler(&self) -> Reconciler {
        Reconciler::new(self.gateway.clone(), self.orders.clone())
    }
}

/// Load gateway settings from config/payzaty.toml, falling back to
/// environment variables, then to sandbox defaults.
fn load_settings() -> anyhow::Result<GatewaySettings> {
    let config_paths = [
        "config/payzaty.toml",
        "../config/payzaty.toml",
        "../../config/payzaty.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let settings: GatewaySettings = toml::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded gateway settings from {}", path);
            return Ok(settings);
        }
    }

    if let Ok(settings) = settings_from_env() {
        tracing::info!("Loaded gateway settings from environment");
        return Ok(settings);
    }

    tracing::warn!("No gateway settings found, using sandbox defaults");
    Ok(GatewaySettings::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    // AppConfig tests construct explicitly rather than mutating process
    // env vars, which race with other tests in the same binary.
    #[test]
    fn test_is_production_flag() {
        let mut config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            base_url: "http://localhost:8080".to_string(),
            environment: "development".to_string(),
        };
        assert!(!config.is_production());

        config.environment = "production".to_string();
        assert!(config.is_production());
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            environment: "test".to_string(),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[tokio::test]
    async fn test_new_seeds_locale_resources() {
        let state = AppState::new().await.unwrap();

        let tip = state
            .locales
            .resource("plugins.payments.payzaty.fields.redirectiontip")
            .await
            .unwrap();
        assert!(tip.is_some());
    }

    #[test]
    fn test_settings_toml_shape() {
        let settings: GatewaySettings = toml::from_str(
            r#"
            use_sandbox = true
            account_no = "acc-123"
            secret_key = "sk-456"
            "#,
        )
        .unwrap();
        assert!(settings.use_sandbox);
        assert_eq!(settings.account_no, "acc-123");
    }
}
