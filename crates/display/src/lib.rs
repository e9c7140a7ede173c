//! `balcao-display` — presentation formatting for the dashboard.

pub mod currency;
pub mod status;

pub use currency::format_brl;
pub use status::status_label;
