//! Lenient monetary parsing.
//!
//! Amounts arrive from form inputs and document snapshots as numbers or as
//! free-text strings. Anything that does not read as a number is zero.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

const CURRENCY_SYMBOLS: [char; 6] = ['$', '€', '£', '₹', '₦', '¥'];

/// Parses a monetary string, returning zero when the value is not numeric.
pub fn parse_amount(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };

    let cleaned: String = unsigned
        .trim_start_matches(CURRENCY_SYMBOLS)
        .chars()
        .filter(|ch| *ch != ',' && *ch != '_' && !ch.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    let value = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or(Decimal::ZERO);

    if negative {
        -value
    } else {
        value
    }
}

/// Converts a float into a decimal, mapping NaN and infinities to zero.
pub fn amount_from_f64(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl RawAmount {
    fn into_decimal(self) -> Decimal {
        match self {
            RawAmount::Integer(value) => Decimal::from(value),
            RawAmount::Float(value) => amount_from_f64(value),
            RawAmount::Text(value) => parse_amount(&value),
            RawAmount::Other(_) => Decimal::ZERO,
        }
    }
}

/// `deserialize_with` adapter for monetary fields that never rejects a document.
pub(crate) fn lenient<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawAmount>::deserialize(deserializer)?;
    Ok(raw.map(RawAmount::into_decimal).unwrap_or(Decimal::ZERO))
}
