//! Monetary amounts and the normalization of raw upstream values.
//!
//! The upstream API has emitted money in several shapes over its revisions:
//! integer cents, fractional numbers, decimal strings with `pt-BR` or `en-US`
//! separators, plain digit strings, and objects wrapping one of those under a
//! `value` key. [`normalize`] folds all of them into integer minor units
//! (centavos) and is total: no input makes it fail, unrecognized shapes
//! become zero.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An amount in integer minor units (centavos for BRL).
///
/// Stored as `i64`; refunds and corrections make negative amounts valid.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MonetaryAmount(i64);

impl MonetaryAmount {
    pub const ZERO: MonetaryAmount = MonetaryAmount(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    /// Multiply by a count, saturating at the `i64` bounds.
    ///
    /// Line subtotals are exact integer products, never float arithmetic.
    pub fn times(self, count: i64) -> Self {
        Self(self.0.saturating_mul(count))
    }

    /// Add another amount, saturating at the `i64` bounds.
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

/// Normalize a raw JSON value into integer minor units.
///
/// Accepted shapes, in order of the rules applied:
///
/// 1. absent or `null` is zero;
/// 2. a finite number is already minor units, rounded ties-away-from-zero;
/// 3. a string containing `.` or `,` is major units with the rightmost
///    separator as the decimal mark (all other separators are grouping),
///    scaled by 100; any other non-blank string is a plain count of minor
///    units; blank or non-numeric text is zero;
/// 4. an object carries its amount under the conventional `value` key, with
///    a numeric value treated per rule 2 and a string value parsed only as
///    minor units (no decimal-separator handling);
/// 5. everything else (arrays, booleans) is zero.
pub fn normalize(raw: Option<&Value>) -> MonetaryAmount {
    match raw {
        None | Some(Value::Null) => MonetaryAmount::ZERO,
        Some(Value::Number(number)) => normalize_number(number),
        Some(Value::String(text)) => normalize_text(text),
        Some(Value::Object(map)) => normalize_wrapped(map),
        Some(_) => MonetaryAmount::ZERO,
    }
}

fn normalize_number(number: &serde_json::Number) -> MonetaryAmount {
    if let Some(cents) = number.as_i64() {
        return MonetaryAmount(cents);
    }
    round_minor_units(number.as_f64().unwrap_or(f64::NAN))
}

fn normalize_text(text: &str) -> MonetaryAmount {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return MonetaryAmount::ZERO;
    }
    if trimmed.contains(['.', ',']) {
        return match parse_major_units(trimmed) {
            Some(major) => round_minor_units(major * 100.0),
            None => MonetaryAmount::ZERO,
        };
    }
    parse_minor_units(trimmed)
}

/// Wrapped amounts carry their value under the conventional `value` key.
fn normalize_wrapped(map: &serde_json::Map<String, Value>) -> MonetaryAmount {
    match map.get("value") {
        Some(Value::Number(number)) => normalize_number(number),
        Some(Value::String(text)) => parse_minor_units(text),
        _ => MonetaryAmount::ZERO,
    }
}

/// Decimal branch: the rightmost `.`/`,` is the decimal mark, every other
/// separator occurrence is grouping noise and dropped.
fn parse_major_units(text: &str) -> Option<f64> {
    let decimal_at = text.rfind(['.', ','])?;
    let mut plain = String::with_capacity(text.len());
    for (idx, ch) in text.char_indices() {
        match ch {
            '.' | ',' if idx == decimal_at => plain.push('.'),
            '.' | ',' => {}
            other => plain.push(other),
        }
    }
    plain.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Integer branch: the whole string is a count of minor units.
fn parse_minor_units(text: &str) -> MonetaryAmount {
    match text.trim().parse::<f64>() {
        Ok(count) => round_minor_units(count),
        Err(_) => MonetaryAmount::ZERO,
    }
}

/// Round to the nearest integer, ties away from zero. Non-finite input
/// (overflowed parses, `inf`/`NaN` spellings) degrades to zero.
fn round_minor_units(value: f64) -> MonetaryAmount {
    if !value.is_finite() {
        return MonetaryAmount::ZERO;
    }
    MonetaryAmount(value.round() as i64)
}
