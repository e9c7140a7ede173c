//! Raw order payloads as the upstream API ships them.
//!
//! Monetary fields, quantities and identifiers stay as untyped JSON values
//! here; the upstream has changed their shapes across revisions and every
//! coercion happens in exactly one place downstream of deserialization.

use serde::Deserialize;
use serde_json::Value;

use crate::order::{Customer, OrderStatus};

/// One order as returned by `GET /orders/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrder {
    pub id: Option<Value>,
    pub status: OrderStatus,
    pub customer: Customer,
    pub created_at: Option<Value>,
    #[serde(default)]
    pub order_items: Vec<RawOrderItem>,
    pub total_in_cents: Option<Value>,
    pub total: Option<Value>,
}

/// One line item, before projection.
///
/// The unit price has lived under three different keys over the API's
/// lifetime; all three are captured and resolved by priority downstream.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrderItem {
    pub id: Option<Value>,
    pub quantity: Option<Value>,
    pub product: Option<RawProduct>,
    pub name: Option<String>,
    pub price_in_cents: Option<Value>,
    pub unit_price_in_cents: Option<Value>,
    pub price: Option<Value>,
}

/// Product block nested inside a line item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProduct {
    pub name: Option<String>,
}

/// First alias that is actually present. Explicit JSON `null`s fall through
/// to the next alias, matching payload revisions that emit every key.
pub(crate) fn first_present<'a, const N: usize>(
    aliases: [Option<&'a Value>; N],
) -> Option<&'a Value> {
    aliases.into_iter().flatten().find(|value| !value.is_null())
}

/// Quantity coercion: finite numbers and numeric strings count; everything
/// else (absent, null, non-numeric) is zero. Fractional counts round ties
/// away from zero and negative counts are kept as-is.
pub(crate) fn coerce_quantity(raw: Option<&Value>) -> i64 {
    let count = match raw {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        _ => 0.0,
    };
    if count.is_finite() {
        count.round() as i64
    } else {
        0
    }
}

/// Identifier coercion: scalar ids stringify verbatim, anything else is the
/// empty string.
pub(crate) fn coerce_id(raw: Option<&Value>) -> String {
    match raw {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}
