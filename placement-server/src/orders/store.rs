//! In-memory order and message store
//!
//! Orders live in a `DashMap`, each behind its own `parking_lot::Mutex`.
//! `update` is the only mutation path: it clones the record, applies the
//! mutator to the clone, and commits on success, so a failed mutator never
//! leaves partial state behind. Locks are taken with a bounded wait; a
//! caller that loses the wait gets `ConcurrencyConflict` instead of
//! blocking indefinitely.
//!
//! Message threads are append-only. The per-order sequence number is
//! assigned under the thread lock, which is what makes insertion order the
//! authoritative read order.

use dashmap::DashMap;
use parking_lot::Mutex;
use shared::models::{Message, Order};
use shared::{CoreError, CoreResult};
use std::sync::Arc;
use std::time::Duration;

/// Bound on waiting for a per-order lock
const LOCK_WAIT: Duration = Duration::from_secs(5);

/// Concurrent store for orders and their message threads
#[derive(Default)]
pub struct OrderStore {
    orders: DashMap<String, Arc<Mutex<Order>>>,
    threads: DashMap<String, Arc<Mutex<Vec<Message>>>>,
}

impl std::fmt::Debug for OrderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStore")
            .field("orders", &self.orders.len())
            .field("threads", &self.threads.len())
            .finish()
    }
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new order and its empty message thread
    ///
    /// Ids are server-generated UUIDs; a duplicate means two writers raced
    /// on the same id and the loser must retry with a fresh one.
    pub fn create(&self, order: Order) -> CoreResult<String> {
        let id = order.id.clone();
        match self.orders.entry(id.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(CoreError::conflict(id)),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(order)));
                self.threads.insert(id.clone(), Arc::new(Mutex::new(Vec::new())));
                Ok(id)
            }
        }
    }

    /// Whether an order exists
    pub fn contains(&self, id: &str) -> bool {
        self.orders.contains_key(id)
    }

    /// Fetch a snapshot of an order
    pub fn get(&self, id: &str) -> CoreResult<Order> {
        let entry = self
            .orders
            .get(id)
            .ok_or_else(|| CoreError::not_found(format!("Order {id}")))?;
        let cell = entry.value().clone();
        drop(entry);
        let guard = cell
            .try_lock_for(LOCK_WAIT)
            .ok_or_else(|| CoreError::conflict(id))?;
        Ok(guard.clone())
    }

    /// All orders belonging to a merchant, newest first
    pub fn list_by_merchant(&self, merchant_id: &str) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .filter_map(|entry| {
                let guard = entry.value().try_lock_for(LOCK_WAIT)?;
                (guard.merchant_id == merchant_id).then(|| guard.clone())
            })
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        orders
    }

    /// Atomically read-modify-write a single order
    ///
    /// The mutator runs against a draft clone; the draft replaces the
    /// stored record (with a version bump) only when the mutator succeeds.
    pub fn update<T>(
        &self,
        id: &str,
        mutator: impl FnOnce(&mut Order) -> CoreResult<T>,
    ) -> CoreResult<T> {
        let entry = self
            .orders
            .get(id)
            .ok_or_else(|| CoreError::not_found(format!("Order {id}")))?;
        let cell = entry.value().clone();
        drop(entry);

        let mut guard = cell
            .try_lock_for(LOCK_WAIT)
            .ok_or_else(|| CoreError::conflict(id))?;
        let mut draft = guard.clone();
        let result = mutator(&mut draft)?;
        draft.version = guard.version + 1;
        *guard = draft;
        Ok(result)
    }

    /// Append a message to an order's thread, assigning its sequence
    ///
    /// Returns the stored message. Sequence numbers start at 1 and are
    /// dense per order.
    pub fn append_message(&self, mut message: Message) -> CoreResult<Message> {
        let entry = self
            .threads
            .get(&message.order_id)
            .ok_or_else(|| CoreError::not_found(format!("Order {}", message.order_id)))?;
        let thread = entry.value().clone();
        drop(entry);

        let mut guard = thread
            .try_lock_for(LOCK_WAIT)
            .ok_or_else(|| CoreError::conflict(message.order_id.clone()))?;
        message.sequence = guard.len() as u64 + 1;
        guard.push(message.clone());
        Ok(message)
    }

    /// The full message thread in append order
    pub fn messages(&self, order_id: &str) -> CoreResult<Vec<Message>> {
        let entry = self
            .threads
            .get(order_id)
            .ok_or_else(|| CoreError::not_found(format!("Order {order_id}")))?;
        let thread = entry.value().clone();
        drop(entry);

        let guard = thread
            .try_lock_for(LOCK_WAIT)
            .ok_or_else(|| CoreError::conflict(order_id))?;
        Ok(guard.clone())
    }
}
