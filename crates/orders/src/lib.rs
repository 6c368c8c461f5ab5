//! `cartstock-orders` — order-side entities, lifecycle events and the
//! reservation reactor.
//!
//! The reactor listens to order and order-item lifecycle events and issues
//! stock transactions through the seams in `cartstock-stock`: stock goes OUT
//! when an item enters a cart and comes back IN when the item leaves it, the
//! cart is cancelled or deleted, or the order is placed (at which point the
//! host's own sale transaction takes over).

pub mod bus;
pub mod events;
pub mod order;
pub mod reactor;
pub mod store;

pub use bus::{LifecycleBus, Subscription};
pub use events::{OrderEventHandler, OrderLifecycleEvent, dispatch};
pub use order::{Order, OrderItem, WorkflowGroup};
pub use reactor::{CartNotifier, StockReserveReactor};
pub use store::{OrderItemStore, OrderStore, OrderTypeStore, PaymentLookup, StoreError};
