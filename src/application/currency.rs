use crate::domain::error::DomainError;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

// Stub rate table, USD-based. A production build would pull these from a
// rates provider.
const DUMMY_RATES: &[(&str, f64)] = &[
    ("USD", 1.0),
    ("EUR", 0.92),
    ("GBP", 0.79),
    ("JPY", 151.82),
    ("AUD", 1.52),
    ("CAD", 1.36),
    ("CNY", 7.24),
    ("INR", 83.31),
    ("BRL", 5.04),
    ("MXN", 16.65),
];

#[derive(Debug, Serialize)]
pub struct CurrencyRates {
    pub base: String,
    pub rates: HashMap<String, f64>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct Conversion {
    pub from: String,
    pub to: String,
    pub original_amount: f64,
    pub converted_amount: f64,
    pub rate: f64,
    pub timestamp: DateTime<Utc>,
}

/// All rates re-expressed relative to `base`.
pub fn rates(base: &str) -> Result<CurrencyRates> {
    let base_rate = lookup(base)?;
    let rates = DUMMY_RATES
        .iter()
        .map(|(currency, rate)| (currency.to_string(), rate / base_rate))
        .collect();
    Ok(CurrencyRates {
        base: base.to_string(),
        rates,
        last_updated: Utc::now(),
    })
}

pub fn convert(from: &str, to: &str, amount: f64) -> Result<Conversion> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(DomainError::InvalidAmount.into());
    }
    let from_rate = lookup(from)?;
    let to_rate = lookup(to)?;
    let rate = to_rate / from_rate;
    // Round to cents, like the original converter did.
    let converted_amount = (amount * rate * 100.0).round() / 100.0;
    Ok(Conversion {
        from: from.to_string(),
        to: to.to_string(),
        original_amount: amount,
        converted_amount,
        rate,
        timestamp: Utc::now(),
    })
}

fn lookup(currency: &str) -> Result<f64> {
    DUMMY_RATES
        .iter()
        .find(|(code, _)| *code == currency)
        .map(|(_, rate)| *rate)
        .ok_or_else(|| DomainError::Validation(format!("Unknown currency: {currency}")).into())
}
