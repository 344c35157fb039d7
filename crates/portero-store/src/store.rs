// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lock-serialized order operations over an [`OrderRepository`].
//!
//! The repository only offers whole-collection load/save, so every mutation
//! here is one read-modify-write cycle under a single async mutex. The
//! conversation engine and the dashboard gateway share one `OrderStore`,
//! which closes the cross-path race a bare read-then-write would have.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::info;

use portero_core::types::{Order, OrderStatus};
use portero_core::{OrderRepository, PorteroError};

/// Fields of an order known before an id and timestamp are allocated.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub room: String,
    pub items: Vec<String>,
    pub guest_address: Option<String>,
}

/// Shared, mutation-serialized view of the persisted order collection.
pub struct OrderStore {
    repository: Arc<dyn OrderRepository>,
    /// Guards every read-modify-write cycle and the id high-water mark.
    state: Mutex<StoreState>,
}

struct StoreState {
    last_id: i64,
}

impl OrderStore {
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self {
            repository,
            state: Mutex::new(StoreState { last_id: 0 }),
        }
    }

    /// Loads the full collection. Reads take the lock too, so a concurrent
    /// save is never observed half-applied.
    pub async fn list(&self) -> Result<Vec<Order>, PorteroError> {
        let _guard = self.state.lock().await;
        self.repository.load_all().await
    }

    /// Creates and persists a new `Pending` order from a draft, returning
    /// the stored record.
    ///
    /// The id is the creation timestamp in milliseconds, bumped past both
    /// the previous allocation and the highest persisted id so that ids stay
    /// unique even when two creations land in the same millisecond.
    ///
    /// Persistence happens entirely inside this call; callers must not send
    /// any success notification until it returns `Ok`.
    pub async fn append(&self, draft: OrderDraft) -> Result<Order, PorteroError> {
        debug_assert!(!draft.items.is_empty(), "orders are never empty at creation");

        let mut state = self.state.lock().await;
        let mut orders = self.repository.load_all().await?;

        let max_persisted = orders.iter().map(|o| o.id).max().unwrap_or(0);
        let id = Utc::now()
            .timestamp_millis()
            .max(state.last_id + 1)
            .max(max_persisted + 1);

        let order = Order {
            id,
            room: draft.room,
            items: draft.items,
            guest_address: draft.guest_address,
            status: OrderStatus::Pending,
            created_at: Utc::now().to_rfc3339(),
        };

        orders.push(order.clone());
        self.repository.save_all(&orders).await?;
        state.last_id = id;

        info!(order_id = id, room = %order.room, "order persisted");
        Ok(order)
    }

    /// Transitions an order to a new status and persists the collection.
    ///
    /// Returns the updated order, or [`PorteroError::OrderNotFound`] leaving
    /// the collection unchanged.
    pub async fn update_status(
        &self,
        id: i64,
        status: OrderStatus,
    ) -> Result<Order, PorteroError> {
        let _guard = self.state.lock().await;
        let mut orders = self.repository.load_all().await?;

        let Some(order) = orders.iter_mut().find(|o| o.id == id) else {
            return Err(PorteroError::OrderNotFound { id });
        };
        order.status = status;
        let updated = order.clone();

        self.repository.save_all(&orders).await?;
        info!(order_id = id, status = %status, "order status updated");
        Ok(updated)
    }

    /// Deletes one order by id.
    pub async fn delete(&self, id: i64) -> Result<(), PorteroError> {
        let _guard = self.state.lock().await;
        let mut orders = self.repository.load_all().await?;

        let before = orders.len();
        orders.retain(|o| o.id != id);
        if orders.len() == before {
            return Err(PorteroError::OrderNotFound { id });
        }

        self.repository.save_all(&orders).await?;
        info!(order_id = id, "order deleted");
        Ok(())
    }

    /// Removes every order with the given status, returning how many were
    /// purged.
    pub async fn purge_status(&self, status: OrderStatus) -> Result<usize, PorteroError> {
        let _guard = self.state.lock().await;
        let mut orders = self.repository.load_all().await?;

        let before = orders.len();
        orders.retain(|o| o.status != status);
        let removed = before - orders.len();

        self.repository.save_all(&orders).await?;
        info!(removed, status = %status, "orders purged by status");
        Ok(removed)
    }

    /// Removes every completed order.
    pub async fn purge_done(&self) -> Result<usize, PorteroError> {
        self.purge_status(OrderStatus::Done).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::JsonFileRepository;
    use tempfile::tempdir;

    fn draft() -> OrderDraft {
        OrderDraft {
            room: "512".to_string(),
            items: vec!["Pancakes with Maple Syrup x2 - ₹900".to_string()],
            guest_address: Some("guest-1@c.us".to_string()),
        }
    }

    fn store_at(dir: &std::path::Path) -> OrderStore {
        OrderStore::new(Arc::new(JsonFileRepository::new(dir.join("orders.json"))))
    }

    #[tokio::test]
    async fn append_creates_pending_order_with_timestamp_id() {
        let dir = tempdir().unwrap();
        let store = store_at(dir.path());

        let order = store.append(draft()).await.unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.room, "512");
        assert!(order.id > 1_700_000_000_000, "id should be millisecond-scale");

        let listed = store.list().await.unwrap();
        assert_eq!(listed, vec![order]);
    }

    #[tokio::test]
    async fn sequential_appends_allocate_unique_increasing_ids() {
        let dir = tempdir().unwrap();
        let store = store_at(dir.path());

        let mut ids = Vec::new();
        for _ in 0..20 {
            ids.push(store.append(draft()).await.unwrap().id);
        }

        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 20, "ids must be unique");
        assert!(ids.windows(2).all(|w| w[0] < w[1]), "ids must increase");
    }

    #[tokio::test]
    async fn id_allocation_survives_a_restart() {
        let dir = tempdir().unwrap();

        let first_id = store_at(dir.path()).append(draft()).await.unwrap().id;
        // A fresh store over the same file must not reuse persisted ids.
        let second_id = store_at(dir.path()).append(draft()).await.unwrap().id;
        assert!(second_id > first_id);
    }

    #[tokio::test]
    async fn status_transitions_succeed_for_each_target() {
        let dir = tempdir().unwrap();
        let store = store_at(dir.path());

        for status in [OrderStatus::Confirmed, OrderStatus::Done, OrderStatus::Rejected] {
            let order = store.append(draft()).await.unwrap();
            let updated = store.update_status(order.id, status).await.unwrap();
            assert_eq!(updated.status, status);
        }
    }

    #[tokio::test]
    async fn unknown_id_reports_not_found_and_leaves_collection_unchanged() {
        let dir = tempdir().unwrap();
        let store = store_at(dir.path());
        let order = store.append(draft()).await.unwrap();

        let err = store.update_status(999, OrderStatus::Done).await.unwrap_err();
        assert!(matches!(err, PorteroError::OrderNotFound { id: 999 }));

        let listed = store.list().await.unwrap();
        assert_eq!(listed, vec![order]);
    }

    #[tokio::test]
    async fn delete_removes_only_the_named_order() {
        let dir = tempdir().unwrap();
        let store = store_at(dir.path());

        let first = store.append(draft()).await.unwrap();
        let second = store.append(draft()).await.unwrap();

        store.delete(first.id).await.unwrap();
        let listed = store.list().await.unwrap();
        assert_eq!(listed, vec![second]);

        assert!(matches!(
            store.delete(first.id).await,
            Err(PorteroError::OrderNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn purge_done_removes_exactly_done_orders() {
        let dir = tempdir().unwrap();
        let store = store_at(dir.path());

        let done = store.append(draft()).await.unwrap();
        let pending = store.append(draft()).await.unwrap();
        store.update_status(done.id, OrderStatus::Done).await.unwrap();

        let removed = store.purge_done().await.unwrap();
        assert_eq!(removed, 1);

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, pending.id);
    }
}
