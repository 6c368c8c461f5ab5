//! Queue consumer deleting expired cart items.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use cartstock_core::{OrderItemId, SettingsStore};
use cartstock_orders::{OrderItemStore, OrderStore};

use crate::queue::ExpirationBatch;

/// Processes queued expiration batches.
///
/// Each item id is handled independently and re-validated against freshly
/// loaded state, so duplicate or stale queue deliveries degrade to no-ops.
pub struct CartExpirationWorker {
    items: Arc<dyn OrderItemStore>,
    orders: Arc<dyn OrderStore>,
    settings: Arc<dyn SettingsStore>,
}

impl CartExpirationWorker {
    pub fn new(
        items: Arc<dyn OrderItemStore>,
        orders: Arc<dyn OrderStore>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            items,
            orders,
            settings,
        }
    }

    /// Consume one queue item.
    ///
    /// The expiration threshold is recomputed here from the *current*
    /// settings; when cart expiration has been disabled since enqueue, the
    /// whole batch is dropped without partial work.
    pub fn process(&self, batch: &ExpirationBatch, now: DateTime<Utc>) {
        let settings = self.settings.load();
        if !settings.cart_expiration_enabled {
            return;
        }
        let threshold = settings.interval.subtract_from(now);

        for &item_id in batch.ids() {
            self.expire_item(item_id, threshold);
        }
    }

    fn expire_item(&self, item_id: OrderItemId, threshold: DateTime<Utc>) {
        let Some(item) = self.items.load_unchanged(item_id) else {
            debug!(item = %item_id, "cannot find order item");
            return;
        };
        let Some(mut order) = self.orders.load_unchanged(item.order_id) else {
            debug!(order = %item.order_id, item = %item_id, "cannot find owning order");
            return;
        };

        // Make sure the cart order still qualifies: it may have been touched,
        // placed, or the configured interval shortened since enqueue.
        if !order.cart || order.changed > threshold {
            return;
        }

        order.remove_item(item_id);
        if let Err(err) = self.orders.save(&order) {
            warn!(order = %order.id, error = %err, "failed to save order while expiring item");
            return;
        }
        if order.items().is_empty() {
            debug!(order = %order.id, "deleting empty cart order");
            if let Err(err) = self.orders.delete(order.id) {
                warn!(order = %order.id, error = %err, "failed to delete empty cart order");
            }
        }
        if let Err(err) = self.items.delete(item_id) {
            warn!(item = %item_id, error = %err, "failed to delete expired order item");
        }
    }
}
