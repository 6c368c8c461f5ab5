//! Order and order item entities.
//!
//! These mirror the host's persisted entities closely enough for the
//! reservation logic to diff before/after states; they are not aggregates in
//! their own right. Persistence belongs to the host stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cartstock_core::{CustomerId, OrderId, OrderItemId, OrderTypeId, StoreId};
use cartstock_stock::PurchasableEntity;

/// The workflow group an order's state machine belongs to.
///
/// Reservation logic only applies to orders in the standard order workflow
/// group; other workflows reusing the order entity type are left alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowGroup(String);

impl WorkflowGroup {
    pub const STANDARD: &'static str = "order";

    pub fn standard() -> Self {
        Self(Self::STANDARD.to_string())
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn is_standard(&self) -> bool {
        self.0 == Self::STANDARD
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A line item: a purchasable entity and a quantity, owned by one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    /// The purchased entity; `None` when the referenced entity no longer
    /// resolves (reservation logic skips such items silently).
    pub purchased: Option<PurchasableEntity>,
    pub quantity: i64,
}

impl OrderItem {
    pub fn new(order_id: OrderId, purchased: PurchasableEntity, quantity: i64) -> Self {
        Self {
            id: OrderItemId::new(),
            order_id,
            purchased: Some(purchased),
            quantity,
        }
    }
}

/// An order: a cart while the customer is still assembling it, then placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub order_type: OrderTypeId,
    pub customer_id: CustomerId,
    pub store_id: StoreId,
    /// True while the order is still a shopping cart.
    pub cart: bool,
    /// Last modification time; the expiration pipeline keys off this.
    pub changed: DateTime<Utc>,
    pub workflow_group: WorkflowGroup,
    items: Vec<OrderItem>,
}

impl Order {
    pub fn new(
        order_type: OrderTypeId,
        customer_id: CustomerId,
        store_id: StoreId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: OrderId::new(),
            order_type,
            customer_id,
            store_id,
            cart: true,
            changed: now,
            workflow_group: WorkflowGroup::standard(),
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn has_item(&self, id: OrderItemId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn find_item(&self, id: OrderItemId) -> Option<&OrderItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Append an item, preserving insertion order.
    pub fn push_item(&mut self, item: OrderItem) {
        self.items.push(item);
    }

    pub fn remove_item(&mut self, id: OrderItemId) {
        self.items.retain(|item| item.id != id);
    }

    /// Bump the modification timestamp, as the host does on every save.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.changed = now;
    }

    /// Mark the cart as placed.
    pub fn place(&mut self, now: DateTime<Utc>) {
        self.cart = false;
        self.changed = now;
    }
}
