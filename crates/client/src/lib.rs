//! `balcao-client` — authenticated retrieval of order payloads and the
//! visibility-gated detail resource on top of it.

pub mod api;
pub mod config;
pub mod resource;
pub mod session;

pub use api::{FetchError, OrderApiClient};
pub use config::ClientConfig;
pub use resource::{DetailState, OrderDetailsResource};
pub use session::{Session, SessionError};
