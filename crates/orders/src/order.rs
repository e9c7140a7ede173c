//! The canonical order aggregate and its construction from raw payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use balcao_core::{normalize, MonetaryAmount};

use crate::item::{project_item, OrderItem};
use crate::raw::{coerce_id, first_present, RawOrder};

/// Order status lifecycle as reported upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Canceled,
    Processing,
    Delivering,
    Delivered,
}

/// Customer block of an order. Passed through untouched; the phone is the
/// only optional contact field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub phone: Option<String>,
    pub email: String,
}

/// Fully normalized order, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAggregate {
    pub id: String,
    pub status: OrderStatus,
    pub customer: Customer,
    pub created_at: DateTime<Utc>,
    /// Lines in the order the payload listed them.
    pub items: Vec<OrderItem>,
    /// The payload's own total, normalized. Never reconciled against the
    /// lines; see [`OrderAggregate::items_subtotal`] for the computed sum.
    pub total: MonetaryAmount,
}

impl OrderAggregate {
    /// Sum of the line subtotals, saturating.
    ///
    /// Upstream data may legitimately disagree with [`OrderAggregate::total`]
    /// (delivery fees, discounts, or plain bad data); which figure to trust
    /// is the caller's policy.
    pub fn items_subtotal(&self) -> MonetaryAmount {
        self.items
            .iter()
            .fold(MonetaryAmount::ZERO, |acc, item| {
                acc.saturating_add(item.subtotal)
            })
    }
}

/// Build the canonical aggregate from a raw payload.
///
/// Total over any deserialized payload: monetary noise degrades to zero
/// amounts and a missing or unreadable creation time degrades to the Unix
/// epoch. The order total resolves from `totalInCents` first, then `total`.
pub fn build_order(raw: &RawOrder) -> OrderAggregate {
    OrderAggregate {
        id: coerce_id(raw.id.as_ref()),
        status: raw.status,
        customer: raw.customer.clone(),
        created_at: parse_created_at(raw.created_at.as_ref()),
        items: raw.order_items.iter().map(project_item).collect(),
        total: normalize(first_present([
            raw.total_in_cents.as_ref(),
            raw.total.as_ref(),
        ])),
    }
}

/// Creation time arrives as an RFC 3339 string or as epoch milliseconds,
/// depending on the upstream revision.
fn parse_created_at(raw: Option<&Value>) -> DateTime<Utc> {
    match raw {
        Some(Value::String(text)) => DateTime::parse_from_rfc3339(text.trim())
            .map(|parsed| parsed.with_timezone(&Utc))
            .unwrap_or(DateTime::UNIX_EPOCH),
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|millis| millis.is_finite())
                    .map(|millis| millis as i64)
            })
            .and_then(DateTime::from_timestamp_millis)
            .unwrap_or(DateTime::UNIX_EPOCH),
        _ => DateTime::UNIX_EPOCH,
    }
}
