//! Platform fee and currency normalization for checkout requests.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Currency applied when a checkout request names none.
pub const DEFAULT_CURRENCY: &str = "usd";

/// Platform fee percentage, validated to lie within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct FeePercent(f64);

impl FeePercent {
    pub fn new(percent: f64) -> Result<Self, ValidationError> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(ValidationError::invalid_format(
                "platform_fee_percent",
                format!("must be a number between 0 and 100, got {}", percent),
            ));
        }
        Ok(Self(percent))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for FeePercent {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FeePercent> for f64 {
    fn from(percent: FeePercent) -> Self {
        percent.0
    }
}

/// Shortest decimal rendering: `10` not `10.0`, `2.5` stays `2.5`.
impl fmt::Display for FeePercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Computes the platform fee in minor currency units.
///
/// Rounding rule: round half away from zero (`f64::round`) applied to the
/// floating product `amount * percent / 100`. Amounts are positive, so a
/// fee of exactly half a cent rounds up. The result never exceeds `amount`.
pub fn platform_fee(amount: i64, percent: FeePercent) -> i64 {
    (amount as f64 * percent.value() / 100.0).round() as i64
}

/// Lower-cases a requested currency code, defaulting to [`DEFAULT_CURRENCY`].
pub fn normalize_currency(requested: Option<&str>) -> Result<String, ValidationError> {
    let currency = requested.map(str::trim).unwrap_or_default();
    if currency.is_empty() {
        return Ok(DEFAULT_CURRENCY.to_string());
    }

    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::invalid_format(
            "currency",
            "must be a three-letter ISO 4217 code",
        ));
    }

    Ok(currency.to_ascii_lowercase())
}
