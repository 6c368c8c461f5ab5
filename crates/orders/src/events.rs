//! Order lifecycle events and the handler seam.
//!
//! Events carry the affected entity and, where the host attached one, its
//! in-flight pre-mutation snapshot. Handlers are composed, not inherited:
//! one component implements [`OrderEventHandler`] and is driven through
//! [`dispatch`].

use cartstock_stock::StockError;

use crate::order::{Order, OrderItem};

/// An order or order-item lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderLifecycleEvent {
    /// The order's workflow transitioned cart → placed.
    Placed { order: Order },
    /// The order was saved; `original` is the pre-save snapshot if the host
    /// attached one.
    Updated {
        order: Order,
        original: Option<Order>,
    },
    /// The order's workflow transitioned to a cancel state.
    Cancelled {
        order: Order,
        original: Option<Order>,
    },
    /// Fired before a hard delete, while the items are still readable.
    PreDelete { order: Order },
    /// An order item was saved.
    ItemUpdated {
        item: OrderItem,
        original: Option<OrderItem>,
    },
    /// An order item was deleted.
    ItemDeleted { item: OrderItem },
}

/// Receiver of order lifecycle events.
pub trait OrderEventHandler {
    fn on_place(&self, order: &Order) -> Result<(), StockError>;

    fn on_update(&self, order: &Order, original: Option<&Order>) -> Result<(), StockError>;

    fn on_cancel(&self, order: &Order, original: Option<&Order>) -> Result<(), StockError>;

    fn on_delete(&self, order: &Order) -> Result<(), StockError>;

    fn on_item_update(
        &self,
        item: &OrderItem,
        original: Option<&OrderItem>,
    ) -> Result<(), StockError>;

    fn on_item_delete(&self, item: &OrderItem) -> Result<(), StockError>;
}

/// Route one event to the matching handler method.
pub fn dispatch(
    handler: &dyn OrderEventHandler,
    event: &OrderLifecycleEvent,
) -> Result<(), StockError> {
    match event {
        OrderLifecycleEvent::Placed { order } => handler.on_place(order),
        OrderLifecycleEvent::Updated { order, original } => {
            handler.on_update(order, original.as_ref())
        }
        OrderLifecycleEvent::Cancelled { order, original } => {
            handler.on_cancel(order, original.as_ref())
        }
        OrderLifecycleEvent::PreDelete { order } => handler.on_delete(order),
        OrderLifecycleEvent::ItemUpdated { item, original } => {
            handler.on_item_update(item, original.as_ref())
        }
        OrderLifecycleEvent::ItemDeleted { item } => handler.on_item_delete(item),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::Utc;

    use cartstock_core::{CustomerId, OrderTypeId, StoreId};

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<&'static str>>,
    }

    impl OrderEventHandler for Recorder {
        fn on_place(&self, _order: &Order) -> Result<(), StockError> {
            self.calls.lock().unwrap().push("place");
            Ok(())
        }

        fn on_update(&self, _order: &Order, original: Option<&Order>) -> Result<(), StockError> {
            self.calls
                .lock()
                .unwrap()
                .push(if original.is_some() { "update+snapshot" } else { "update" });
            Ok(())
        }

        fn on_cancel(&self, _order: &Order, _original: Option<&Order>) -> Result<(), StockError> {
            self.calls.lock().unwrap().push("cancel");
            Ok(())
        }

        fn on_delete(&self, _order: &Order) -> Result<(), StockError> {
            self.calls.lock().unwrap().push("delete");
            Ok(())
        }

        fn on_item_update(
            &self,
            _item: &OrderItem,
            _original: Option<&OrderItem>,
        ) -> Result<(), StockError> {
            self.calls.lock().unwrap().push("item_update");
            Ok(())
        }

        fn on_item_delete(&self, _item: &OrderItem) -> Result<(), StockError> {
            self.calls.lock().unwrap().push("item_delete");
            Ok(())
        }
    }

    fn order() -> Order {
        Order::new(
            OrderTypeId::from("default"),
            CustomerId::new(),
            StoreId::new(),
            Utc::now(),
        )
    }

    #[test]
    fn dispatch_routes_each_event_kind() {
        let recorder = Recorder::default();
        let o = order();

        dispatch(&recorder, &OrderLifecycleEvent::Placed { order: o.clone() }).unwrap();
        dispatch(
            &recorder,
            &OrderLifecycleEvent::Updated {
                order: o.clone(),
                original: Some(o.clone()),
            },
        )
        .unwrap();
        dispatch(
            &recorder,
            &OrderLifecycleEvent::Cancelled {
                order: o.clone(),
                original: None,
            },
        )
        .unwrap();
        dispatch(&recorder, &OrderLifecycleEvent::PreDelete { order: o }).unwrap();

        assert_eq!(
            *recorder.calls.lock().unwrap(),
            vec!["place", "update+snapshot", "cancel", "delete"]
        );
    }
}
