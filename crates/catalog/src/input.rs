//! Helpers for loosely-typed request fields.
//!
//! Form clients send numbers either as JSON numbers or as strings, and send
//! empty strings for untouched text inputs.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use storedesk_core::{ServiceError, ServiceResult};

/// Largest accepted price. Prices are stored as JSON floats; with at most
/// [`PRICE_SCALE`] decimals below this bound every value survives the
/// float round trip exactly.
pub const MAX_PRICE: u64 = 1_000_000_000;

/// Decimal places a price may carry.
pub const PRICE_SCALE: u32 = 2;

/// Largest accepted stock count.
pub const MAX_STOCK: u64 = 1_000_000_000;

/// A numeric field as it arrives over the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(serde_json::Number),
    Text(String),
}

impl From<u64> for NumericInput {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl NumericInput {
    /// Parse as a non-negative decimal of at most [`PRICE_SCALE`] places, up
    /// to [`MAX_PRICE`].
    pub fn to_price(&self, field: &str) -> ServiceResult<Decimal> {
        let raw = match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.trim().to_string(),
        };
        let value = Decimal::from_str(&raw)
            .or_else(|_| Decimal::from_scientific(&raw))
            .map_err(|_| ServiceError::validation(format!("{field} must be a number")))?;
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ServiceError::validation(format!("{field} must not be negative")));
        }
        let value = value.normalize();
        if value > Decimal::from(MAX_PRICE) {
            return Err(ServiceError::validation(format!(
                "{field} must not exceed {MAX_PRICE}"
            )));
        }
        if value.scale() > PRICE_SCALE {
            return Err(ServiceError::validation(format!(
                "{field} must have at most {PRICE_SCALE} decimal places"
            )));
        }
        Ok(value)
    }

    /// Parse as a non-negative integer up to [`MAX_STOCK`].
    pub fn to_count(&self, field: &str) -> ServiceResult<u64> {
        let invalid = || ServiceError::validation(format!("{field} must be a non-negative integer"));
        let count = match self {
            Self::Number(n) => {
                match n.as_u64() {
                    Some(v) => Ok(v),
                    None => match n.as_f64() {
                        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= MAX_STOCK as f64 => {
                            Ok(f as u64)
                        }
                        _ => Err(invalid()),
                    },
                }
            }
            Self::Text(s) => s.trim().parse::<u64>().map_err(|_| invalid()),
        }?;
        if count > MAX_STOCK {
            return Err(ServiceError::validation(format!(
                "{field} must not exceed {MAX_STOCK}"
            )));
        }
        Ok(count)
    }
}

/// A text field counts as supplied only when it is present and not blank.
pub fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Required text field on create.
pub fn required<'a>(value: &'a Option<String>, field: &str) -> ServiceResult<&'a str> {
    supplied(value).ok_or_else(|| ServiceError::validation(format!("{field} is required")))
}
