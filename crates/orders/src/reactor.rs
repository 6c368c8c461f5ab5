//! The reservation reactor.
//!
//! Performs stock transactions on order and order item lifecycle events:
//! stock is taken OUT while an item sits in a cart and put back IN when the
//! item leaves the cart or the order is placed, at which point the host's
//! own sale transaction takes over.

use std::sync::Arc;

use tracing::debug;

use cartstock_core::{SettingsStore, TransactionId};
use cartstock_stock::{
    LocationResolver, PurchasableEntity, SaleContext, StockControlChecker, StockError,
    StockEventType, StockMovement, TransactionMetadata, TransactionSink,
};

use crate::events::OrderEventHandler;
use crate::order::{Order, OrderItem};
use crate::store::{OrderItemStore, OrderStore};

/// Sink for the optional user-facing cart expiry notice.
pub trait CartNotifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Issues reservation transactions in response to lifecycle events.
///
/// Every collaborator is injected; the reactor holds no ambient state beyond
/// them and performs all work synchronously within the triggering event.
pub struct StockReserveReactor {
    stock_control: Arc<dyn StockControlChecker>,
    resolver: Arc<dyn LocationResolver>,
    sink: Arc<dyn TransactionSink>,
    settings: Arc<dyn SettingsStore>,
    notifier: Arc<dyn CartNotifier>,
    orders: Arc<dyn OrderStore>,
    items: Arc<dyn OrderItemStore>,
}

impl StockReserveReactor {
    pub fn new(
        stock_control: Arc<dyn StockControlChecker>,
        resolver: Arc<dyn LocationResolver>,
        sink: Arc<dyn TransactionSink>,
        settings: Arc<dyn SettingsStore>,
        notifier: Arc<dyn CartNotifier>,
        orders: Arc<dyn OrderStore>,
        items: Arc<dyn OrderItemStore>,
    ) -> Self {
        Self {
            stock_control,
            resolver,
            sink,
            settings,
            notifier,
            orders,
            items,
        }
    }

    /// The pre-mutation order, from the event snapshot when the host attached
    /// one, otherwise reloaded unchanged from storage.
    fn original_order(&self, order: &Order, snapshot: Option<&Order>) -> Option<Order> {
        match snapshot {
            Some(original) => Some(original.clone()),
            None => self.orders.load_unchanged(order.id),
        }
    }

    /// Snapshot-or-reload fallback for order items.
    fn original_item(&self, item: &OrderItem, snapshot: Option<&OrderItem>) -> Option<OrderItem> {
        match snapshot {
            Some(original) => Some(original.clone()),
            None => self.items.load_unchanged(item.id),
        }
    }

    /// The item's purchased entity, if it resolves and is stock controlled.
    fn controlled_entity<'a>(&self, item: &'a OrderItem) -> Option<&'a PurchasableEntity> {
        let entity = item.purchased.as_ref()?;
        self.stock_control
            .is_stock_controlled(entity)
            .then_some(entity)
    }

    /// Resolve the location and hand one movement to the stock ledger.
    fn record_movement(
        &self,
        event_type: StockEventType,
        order: &Order,
        entity: &PurchasableEntity,
        movement: StockMovement,
    ) -> Result<TransactionId, StockError> {
        let context = SaleContext {
            customer_id: order.customer_id,
            store_id: order.store_id,
        };
        let location = self
            .resolver
            .transaction_location(&context, entity, movement.quantity)
            .ok_or(StockError::NoLocation(entity.id))?;
        let metadata = TransactionMetadata {
            related_order_id: order.id,
            related_customer_id: order.customer_id,
            message: event_type.default_message().to_string(),
        };
        let transaction_id = self.sink.record(
            &context,
            entity,
            event_type,
            movement.quantity,
            &location,
            movement.transaction_type,
            metadata,
        )?;
        debug!(
            order = %order.id,
            entity = %entity.id,
            quantity = movement.quantity,
            event = event_type.id(),
            "recorded stock movement"
        );
        Ok(transaction_id)
    }
}

impl OrderEventHandler for StockReserveReactor {
    /// On placement, add back what was reserved at cart stage; the host's own
    /// sale transaction takes it out again.
    fn on_place(&self, order: &Order) -> Result<(), StockError> {
        for item in order.items() {
            let Some(entity) = self.controlled_entity(item) else {
                continue;
            };
            self.record_movement(
                StockEventType::OrderPlace,
                order,
                entity,
                StockMovement::release(item.quantity),
            )?;
        }
        Ok(())
    }

    /// Reserve stock for items that appear on a still-in-cart order.
    ///
    /// New items are detected by diffing the saved order against its
    /// pre-save state: present now, absent before.
    fn on_update(&self, order: &Order, original: Option<&Order>) -> Result<(), StockError> {
        if !order.workflow_group.is_standard() || !order.cart {
            return Ok(());
        }
        let Some(original) = self.original_order(order, original) else {
            debug!(order = %order.id, "no pre-save state available, skipping diff");
            return Ok(());
        };

        let mut reserved_any = false;
        for item in order.items() {
            if original.has_item(item.id) {
                continue;
            }
            let Some(entity) = self.controlled_entity(item) else {
                continue;
            };
            self.record_movement(
                StockEventType::OrderUpdate,
                order,
                entity,
                StockMovement::reserve(item.quantity),
            )?;
            reserved_any = true;
        }

        if reserved_any
            && let Some(message) = self.settings.load().expiration_notice()
        {
            self.notifier.notify(&message);
        }
        Ok(())
    }

    /// Return reserved stock when a cart order is cancelled.
    fn on_cancel(&self, order: &Order, original: Option<&Order>) -> Result<(), StockError> {
        if let Some(original) = self.original_order(order, original)
            && !original.cart
        {
            return Ok(());
        }
        for item in order.items() {
            let Some(entity) = self.controlled_entity(item) else {
                continue;
            };
            self.record_movement(
                StockEventType::OrderCancel,
                order,
                entity,
                StockMovement::release(item.quantity),
            )?;
        }
        Ok(())
    }

    /// Return reserved stock when a cart order is deleted.
    ///
    /// Runs on the pre-delete event: the items are unreadable after the hard
    /// delete.
    fn on_delete(&self, order: &Order) -> Result<(), StockError> {
        if !order.workflow_group.is_standard() || !order.cart {
            return Ok(());
        }
        for item in order.items() {
            let Some(entity) = self.controlled_entity(item) else {
                continue;
            };
            self.record_movement(
                StockEventType::OrderDelete,
                order,
                entity,
                StockMovement::release(item.quantity),
            )?;
        }
        Ok(())
    }

    /// Adjust the reservation when a cart item's quantity changes.
    fn on_item_update(
        &self,
        item: &OrderItem,
        original: Option<&OrderItem>,
    ) -> Result<(), StockError> {
        let Some(order) = self.orders.load(item.order_id) else {
            return Ok(());
        };
        if !order.cart || !order.workflow_group.is_standard() {
            return Ok(());
        }
        let Some(original) = self.original_item(item, original) else {
            return Ok(());
        };
        let Some(movement) = StockMovement::quantity_change(original.quantity, item.quantity)
        else {
            return Ok(());
        };
        let Some(entity) = self.controlled_entity(item) else {
            return Ok(());
        };
        self.record_movement(StockEventType::OrderItemUpdate, &order, entity, movement)?;
        Ok(())
    }

    /// Return reserved stock when an item is removed from a cart.
    fn on_item_delete(&self, item: &OrderItem) -> Result<(), StockError> {
        let Some(order) = self.orders.load(item.order_id) else {
            return Ok(());
        };
        if !order.cart || !order.workflow_group.is_standard() {
            return Ok(());
        }
        let Some(entity) = self.controlled_entity(item) else {
            return Ok(());
        };
        self.record_movement(
            StockEventType::OrderItemDelete,
            &order,
            entity,
            StockMovement::release(item.quantity),
        )?;
        Ok(())
    }
}
