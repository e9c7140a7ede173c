//! Orders domain module.
//!
//! This crate turns raw upstream order payloads into canonical aggregates,
//! implemented purely as deterministic domain logic (no IO, no HTTP). The
//! same payload always builds the same aggregate.

pub mod item;
pub mod order;
pub mod raw;

pub use item::{project_item, OrderItem, NAME_PLACEHOLDER};
pub use order::{build_order, Customer, OrderAggregate, OrderStatus};
pub use raw::{RawOrder, RawOrderItem, RawProduct};
