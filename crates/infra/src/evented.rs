//! Host glue: an order store that publishes lifecycle events on mutation.
//!
//! The host platform fires entity events around every save and delete. This
//! wrapper reproduces that wiring over the in-memory store so the expiration
//! worker's mutations flow back through the lifecycle bus into the reactor,
//! returning reserved stock.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use cartstock_core::{OrderId, OrderItemId, OrderTypeId};
use cartstock_orders::{
    LifecycleBus, Order, OrderItem, OrderItemStore, OrderLifecycleEvent, OrderStore, StoreError,
};

use crate::memory::InMemoryOrderStore;

/// Order/order-item store publishing lifecycle events around mutations.
pub struct EventedOrderStore {
    inner: Arc<InMemoryOrderStore>,
    bus: Arc<LifecycleBus>,
}

impl EventedOrderStore {
    pub fn new(inner: Arc<InMemoryOrderStore>, bus: Arc<LifecycleBus>) -> Self {
        Self { inner, bus }
    }
}

impl OrderStore for EventedOrderStore {
    fn load(&self, id: OrderId) -> Option<Order> {
        self.inner.load(id)
    }

    fn load_unchanged(&self, id: OrderId) -> Option<Order> {
        OrderStore::load_unchanged(self.inner.as_ref(), id)
    }

    fn save(&self, order: &Order) -> Result<(), StoreError> {
        // Attach the pre-save state as the in-flight snapshot, as the host
        // does during an entity save.
        let original = OrderStore::load_unchanged(self.inner.as_ref(), order.id);
        self.inner.save(order)?;
        self.bus.publish(OrderLifecycleEvent::Updated {
            order: order.clone(),
            original,
        });
        Ok(())
    }

    fn delete(&self, id: OrderId) -> Result<(), StoreError> {
        // Pre-delete: publish while the order is still readable.
        if let Some(order) = OrderStore::load_unchanged(self.inner.as_ref(), id) {
            self.bus.publish(OrderLifecycleEvent::PreDelete { order });
        }
        OrderStore::delete(self.inner.as_ref(), id)
    }

    fn expired_cart_ids(&self, order_type: &OrderTypeId, cutoff: DateTime<Utc>) -> Vec<OrderId> {
        self.inner.expired_cart_ids(order_type, cutoff)
    }
}

impl OrderItemStore for EventedOrderStore {
    fn load_unchanged(&self, id: OrderItemId) -> Option<OrderItem> {
        OrderItemStore::load_unchanged(self.inner.as_ref(), id)
    }

    fn delete(&self, id: OrderItemId) -> Result<(), StoreError> {
        if let Some(item) = OrderItemStore::load_unchanged(self.inner.as_ref(), id) {
            self.bus.publish(OrderLifecycleEvent::ItemDeleted { item });
        }
        OrderItemStore::delete(self.inner.as_ref(), id)
    }
}
