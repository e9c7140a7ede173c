//! `balcao-core` — money normalization and order identifiers.
//!
//! Pure domain primitives with no transport concerns; everything here is
//! deterministic and synchronous.

pub mod id;
pub mod money;

pub use id::{InvalidOrderId, OrderId};
pub use money::{normalize, MonetaryAmount};
