//! Typed order identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of an order, as issued by the upstream API.
///
/// Upstream ids are opaque strings (CUIDs today, but that is not a
/// contract), so this wraps the text verbatim instead of forcing a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

/// Error returned when parsing a blank order identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("order id must not be blank")]
pub struct InvalidOrderId;

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<OrderId> for String {
    fn from(value: OrderId) -> Self {
        value.0
    }
}

impl FromStr for OrderId {
    type Err = InvalidOrderId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidOrderId);
        }
        Ok(Self(trimmed.to_string()))
    }
}
