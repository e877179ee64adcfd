//! # Plugin Lifecycle
//!
//! Install seeds default settings (sandbox on, empty credentials) and
//! the localized display strings; uninstall removes both. Both are
//! idempotent and order-independent.

use payzaty_core::{GatewaySettings, LocaleStore, PaymentResult, SettingsStore, ALL_STORES};
use std::collections::HashMap;
use tracing::info;

/// Key prefix of every locale resource this integration owns
pub const RESOURCE_PREFIX: &str = "plugins.payments.payzaty";

fn default_resources() -> HashMap<String, String> {
    let entries = [
        ("fields.accountno", "Account No"),
        ("fields.accountno.hint", "Enter Account No."),
        ("fields.secretkey", "Secure Secret Key"),
        ("fields.secretkey.hint", "Enter Secret Key."),
        ("fields.usesandbox", "Use Sandbox"),
        (
            "fields.usesandbox.hint",
            "Check to enable Sandbox (testing environment).",
        ),
        (
            "fields.redirectiontip",
            "You will be redirected to the Payzaty site to complete the order.",
        ),
        (
            "paymentmethoddescription",
            "Pay by redirecting to the Payzaty hosted payment page",
        ),
    ];

    entries
        .into_iter()
        .map(|(key, value)| (format!("{}.{}", RESOURCE_PREFIX, key), value.to_string()))
        .collect()
}

/// Seed default settings and locale resources
pub async fn install(
    settings: &dyn SettingsStore,
    locales: &dyn LocaleStore,
) -> PaymentResult<()> {
    settings.save(ALL_STORES, GatewaySettings::default()).await?;
    locales.upsert_resources(default_resources()).await?;

    info!("Payzaty payment integration installed");
    Ok(())
}

/// Remove settings and every locale resource under the plugin prefix
pub async fn uninstall(
    settings: &dyn SettingsStore,
    locales: &dyn LocaleStore,
) -> PaymentResult<()> {
    settings.delete_all().await?;
    locales.delete_resources_by_prefix(RESOURCE_PREFIX).await?;

    info!("Payzaty payment integration uninstalled");
    Ok(())
}
