//! Projection of raw line items into canonical order lines.

use serde::{Deserialize, Serialize};

use balcao_core::{normalize, MonetaryAmount};

use crate::raw::{coerce_id, coerce_quantity, first_present, RawOrderItem};

/// Placeholder shown when neither the product nor the item carries a name.
pub const NAME_PLACEHOLDER: &str = "—";

/// Canonical order line, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: MonetaryAmount,
    /// Exact integer product of `unit_price` and `quantity`.
    pub subtotal: MonetaryAmount,
}

/// Project one raw record into a canonical line.
///
/// The unit price resolves from the first present alias, in priority order
/// `priceInCents`, `unitPriceInCents`, `price`; the display name prefers the
/// nested product name over the item-level one. Projection is total: any
/// amount of noise in the record degrades to zeros and the placeholder name,
/// never to an error.
pub fn project_item(raw: &RawOrderItem) -> OrderItem {
    let unit_price = normalize(first_present([
        raw.price_in_cents.as_ref(),
        raw.unit_price_in_cents.as_ref(),
        raw.price.as_ref(),
    ]));
    let quantity = coerce_quantity(raw.quantity.as_ref());

    OrderItem {
        id: coerce_id(raw.id.as_ref()),
        name: resolve_name(raw),
        quantity,
        unit_price,
        subtotal: unit_price.times(quantity),
    }
}

fn resolve_name(raw: &RawOrderItem) -> String {
    raw.product
        .as_ref()
        .and_then(|product| product.name.clone())
        .or_else(|| raw.name.clone())
        .unwrap_or_else(|| NAME_PLACEHOLDER.to_string())
}
