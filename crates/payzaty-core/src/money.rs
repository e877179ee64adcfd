//! # Money Types
//!
//! Minor-unit money handling for amounts sent to the gateway.
//! The checkout amount is always derived from the order total rounded to
//! the currency's decimal places; it is never a fixed placeholder.

use serde::{Deserialize, Serialize};

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    SAR,
    AED,
    EGP,
    KWD,
    USD,
    EUR,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::SAR => "SAR",
            Currency::AED => "AED",
            Currency::EGP => "EGP",
            Currency::KWD => "KWD",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Returns the number of decimal places for this currency
    /// (KWD has 3, the rest here have 2)
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::KWD => 3,
            _ => 2,
        }
    }

    /// Convert a decimal amount to the smallest currency unit (halalas, cents, ...)
    pub fn to_smallest_unit(&self, amount: f64) -> i64 {
        let multiplier = 10_f64.powi(self.decimal_places() as i32);
        (amount * multiplier).round() as i64
    }

    /// Convert from smallest unit back to decimal
    pub fn from_smallest_unit(&self, amount: i64) -> f64 {
        let divisor = 10_f64.powi(self.decimal_places() as i32);
        amount as f64 / divisor
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::SAR
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Price with amount in smallest currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in smallest currency unit (halalas for SAR)
    pub amount: i64,
    /// Currency
    pub currency: Currency,
}

impl Price {
    /// Create a new price from a decimal amount, rounding to the
    /// currency's decimal places
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self {
            amount: currency.to_smallest_unit(amount),
            currency,
        }
    }

    /// Create a price directly from the smallest unit
    pub fn from_minor_units(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Get the decimal amount
    pub fn as_decimal(&self) -> f64 {
        self.currency.from_smallest_unit(self.amount)
    }

    /// Format for display (e.g., "SAR 244.00")
    pub fn display(&self) -> String {
        format!(
            "{} {:.*}",
            self.currency.as_str(),
            self.currency.decimal_places() as usize,
            self.as_decimal()
        )
    }
}
