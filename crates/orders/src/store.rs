//! Storage and host-lookup seams for orders.
//!
//! All persistence is delegated to the host's stores; these traits are the
//! read/write surface the reservation logic needs, injected explicitly.

use chrono::{DateTime, Utc};
use thiserror::Error;

use cartstock_core::{OrderId, OrderItemId, OrderTypeId};

use crate::order::{Order, OrderItem};

/// Storage failures surfaced by the host stores.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("entity not found")]
    NotFound,
    #[error("storage failure: {0}")]
    Storage(String),
}

/// The host's order storage.
pub trait OrderStore: Send + Sync {
    /// Load an order, possibly from a cache.
    fn load(&self, id: OrderId) -> Option<Order>;

    /// Load an order fresh from storage, bypassing any cache.
    ///
    /// The expiration worker re-validates against this, and the reactor uses
    /// it as the fallback when no in-flight pre-mutation snapshot was
    /// attached to an event.
    fn load_unchanged(&self, id: OrderId) -> Option<Order>;

    fn save(&self, order: &Order) -> Result<(), StoreError>;

    fn delete(&self, id: OrderId) -> Result<(), StoreError>;

    /// Ids of cart orders of the given type unmodified since `cutoff`.
    fn expired_cart_ids(&self, order_type: &OrderTypeId, cutoff: DateTime<Utc>) -> Vec<OrderId>;
}

/// The host's order item storage.
pub trait OrderItemStore: Send + Sync {
    /// Load an order item fresh from storage, bypassing any cache.
    fn load_unchanged(&self, id: OrderItemId) -> Option<OrderItem>;

    fn delete(&self, id: OrderItemId) -> Result<(), StoreError>;
}

/// The configured order types (bundles).
pub trait OrderTypeStore: Send + Sync {
    fn all(&self) -> Vec<OrderTypeId>;
}

/// Payment records associated with an order.
///
/// The expiration scanner never prunes carts that have any payment.
pub trait PaymentLookup: Send + Sync {
    fn count_payments(&self, order_id: OrderId) -> u64;
}
