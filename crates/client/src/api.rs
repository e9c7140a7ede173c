//! HTTP client for the partner orders API.

use std::time::Duration;

use rand::Rng;
use thiserror::Error;
use uuid::Uuid;

use balcao_core::OrderId;
use balcao_orders::RawOrder;

use crate::config::ClientConfig;
use crate::session::Session;

/// Errors surfaced by order retrieval.
///
/// Monetary noise never lands here: once a payload deserializes, building
/// the aggregate is total. These cover the transport and the envelope only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Client for the orders endpoint.
///
/// Every request carries the session's bearer token; construction without a
/// session is impossible, so no request ever leaves unauthenticated.
#[derive(Debug, Clone)]
pub struct OrderApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: Session,
}

impl OrderApiClient {
    pub fn new(config: ClientConfig, session: Session) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            session,
        }
    }

    /// Hit the health endpoint. Any response counts as reachable.
    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.config.base_url());
        self.http.get(&url).send().await.is_ok()
    }

    /// Fetch one raw order payload by identifier.
    pub async fn get_order(&self, order_id: &OrderId) -> Result<RawOrder, FetchError> {
        self.simulated_delay().await;

        let request_id = Uuid::now_v7();
        let url = format!("{}/orders/{}", self.config.base_url(), order_id);
        tracing::debug!(%request_id, %order_id, "fetching order");

        let resp = self
            .http
            .get(&url)
            .bearer_auth(self.session.token())
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(
                %request_id,
                %order_id,
                status = status.as_u16(),
                "order fetch rejected"
            );
            return Err(FetchError::Api(status.as_u16(), body));
        }

        resp.json::<RawOrder>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Random 0-3000 ms pause before a request, when the config asks for it.
    async fn simulated_delay(&self) {
        if !self.config.simulate_delay() {
            return;
        }
        let millis = rand::thread_rng().gen_range(0..=3000u64);
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}
