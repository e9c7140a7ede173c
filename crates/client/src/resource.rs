//! Visibility-gated order detail resource.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::{watch, RwLock};

use balcao_core::OrderId;
use balcao_orders::{build_order, OrderAggregate};

use crate::api::{FetchError, OrderApiClient};

/// View-facing state of one order detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailState {
    /// No view is interested; nothing is exposed, cached or not.
    Inactive,
    /// A view is interested and no aggregate has arrived yet.
    Loading,
    /// A view is interested and a built aggregate is available.
    Ready,
}

type FetchOutcome = Option<Result<OrderAggregate, FetchError>>;

#[derive(Default)]
struct Tables {
    active: HashSet<OrderId>,
    cache: HashMap<OrderId, OrderAggregate>,
    in_flight: HashMap<OrderId, watch::Receiver<FetchOutcome>>,
}

/// Lazily fetching, per-id cache of built order aggregates.
///
/// Nothing is fetched until a view activates an identifier. Concurrent
/// activations of the same identifier share one in-flight request, and a
/// completed fetch is cached so reopening a detail view does not refetch.
/// Deactivation hides the data but never cancels a running fetch; its
/// result still lands in the cache for the next activation.
#[derive(Clone)]
pub struct OrderDetailsResource {
    client: OrderApiClient,
    tables: Arc<RwLock<Tables>>,
}

impl OrderDetailsResource {
    pub fn new(client: OrderApiClient) -> Self {
        Self {
            client,
            tables: Arc::new(RwLock::new(Tables::default())),
        }
    }

    /// Open the detail view for an order: mark it active and resolve its
    /// aggregate, fetching at most once per identifier.
    pub async fn activate(&self, order_id: &OrderId) -> Result<OrderAggregate, FetchError> {
        let mut outcome_rx = {
            let mut tables = self.tables.write().await;
            tables.active.insert(order_id.clone());

            if let Some(aggregate) = tables.cache.get(order_id) {
                tracing::debug!(%order_id, "order detail served from cache");
                return Ok(aggregate.clone());
            }

            match tables.in_flight.get(order_id) {
                Some(rx) => rx.clone(),
                None => {
                    let (tx, rx) = watch::channel(None);
                    tables.in_flight.insert(order_id.clone(), rx.clone());
                    self.spawn_fetch(order_id.clone(), tx);
                    rx
                }
            }
        };

        loop {
            if let Some(outcome) = outcome_rx.borrow().clone() {
                return outcome;
            }
            if outcome_rx.changed().await.is_err() {
                // The fetch task dropped its sender without publishing.
                return Err(FetchError::Network("order fetch task aborted".to_string()));
            }
        }
    }

    /// Close the detail view. The cached aggregate is retained for the next
    /// activation and an in-flight fetch keeps running.
    pub async fn deactivate(&self, order_id: &OrderId) {
        self.tables.write().await.active.remove(order_id);
    }

    /// Current view-facing state for an identifier.
    pub async fn state(&self, order_id: &OrderId) -> DetailState {
        let tables = self.tables.read().await;
        if !tables.active.contains(order_id) {
            DetailState::Inactive
        } else if tables.cache.contains_key(order_id) {
            DetailState::Ready
        } else {
            DetailState::Loading
        }
    }

    /// Cached aggregate for an identifier, visible only while active.
    pub async fn peek(&self, order_id: &OrderId) -> Option<OrderAggregate> {
        let tables = self.tables.read().await;
        if !tables.active.contains(order_id) {
            return None;
        }
        tables.cache.get(order_id).cloned()
    }

    /// Drop the cached aggregate so the next activation fetches fresh data.
    pub async fn invalidate(&self, order_id: &OrderId) {
        self.tables.write().await.cache.remove(order_id);
    }

    /// Run the fetch on a detached task. Waiters abandoning their activation
    /// must not cancel the request, so nothing awaits this handle.
    fn spawn_fetch(&self, order_id: OrderId, outcome_tx: watch::Sender<FetchOutcome>) {
        let client = self.client.clone();
        let tables = Arc::clone(&self.tables);

        tokio::spawn(async move {
            let outcome = client
                .get_order(&order_id)
                .await
                .map(|raw| build_order(&raw));

            let mut guard = tables.write().await;
            match &outcome {
                Ok(aggregate) => {
                    guard.cache.insert(order_id.clone(), aggregate.clone());
                }
                Err(err) => {
                    tracing::warn!(%order_id, error = %err, "order fetch failed");
                }
            }
            // The cache entry must be visible before waiters are released,
            // and a failed fetch must leave no in-flight entry behind so the
            // next activation retries.
            guard.in_flight.remove(&order_id);
            drop(guard);

            let _ = outcome_tx.send(Some(outcome));
        });
    }
}
