//! Periodic sweep queueing abandoned carts for expiration.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use cartstock_core::{Interval, IntervalUnit, OrderItemId, SettingsStore};
use cartstock_orders::{Order, OrderStore, OrderTypeStore, PaymentLookup};
use cartstock_stock::{StockChecker, StockLocation, StockLocationStore};

use crate::queue::{ExpirationBatch, ExpirationQueue};

/// Orders are examined in id pages of this size to bound memory.
pub const SCAN_BATCH: usize = 100;

/// Fixed pre-filter window for the sweep query.
///
/// Intentionally wider than the user-configured interval the worker enforces:
/// the loose pre-filter tolerates clock and queue latency, and the worker's
/// authoritative re-check applies the configured interval at processing time.
const SCAN_WINDOW: Interval = Interval::new(2, IntervalUnit::Hour);

/// Finds stale cart orders holding reserved, out-of-stock items and queues
/// their item ids for forced removal.
pub struct CartExpirationScanner {
    order_types: Arc<dyn OrderTypeStore>,
    orders: Arc<dyn OrderStore>,
    payments: Arc<dyn PaymentLookup>,
    checker: Arc<dyn StockChecker>,
    locations: Arc<dyn StockLocationStore>,
    queue: Arc<dyn ExpirationQueue>,
    settings: Arc<dyn SettingsStore>,
}

impl CartExpirationScanner {
    pub fn new(
        order_types: Arc<dyn OrderTypeStore>,
        orders: Arc<dyn OrderStore>,
        payments: Arc<dyn PaymentLookup>,
        checker: Arc<dyn StockChecker>,
        locations: Arc<dyn StockLocationStore>,
        queue: Arc<dyn ExpirationQueue>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            order_types,
            orders,
            payments,
            checker,
            locations,
            queue,
            settings,
        }
    }

    /// One scheduler tick.
    pub fn run(&self, now: DateTime<Utc>) {
        if !self.settings.load().cart_expiration_enabled {
            return;
        }
        let cutoff = SCAN_WINDOW.subtract_from(now);
        let locations = self.locations.load_all();

        for order_type in self.order_types.all() {
            let ids = self.orders.expired_cart_ids(&order_type, cutoff);
            for page in ids.chunks(SCAN_BATCH) {
                for &order_id in page {
                    // Paid-for abandoned carts are never auto-pruned.
                    if self.payments.count_payments(order_id) > 0 {
                        continue;
                    }
                    let Some(order) = self.orders.load(order_id) else {
                        continue;
                    };
                    let expirable = self.expirable_items(&order, &locations);
                    if expirable.is_empty() {
                        continue;
                    }
                    if let Err(err) = self.queue.enqueue(ExpirationBatch::new(expirable)) {
                        warn!(order = %order_id, error = %err, "failed to enqueue expiration batch");
                    }
                }
            }
        }
    }

    /// Ids of the order's items whose reservations are worth reclaiming.
    ///
    /// Items still in stock somewhere are left alone even on an old cart:
    /// removing them would hurt conversion of abandoned carts for no gain.
    fn expirable_items(&self, order: &Order, locations: &[StockLocation]) -> Vec<OrderItemId> {
        let mut ids = Vec::new();
        for item in order.items() {
            let Some(entity) = item.purchased.as_ref() else {
                continue;
            };
            if self.checker.is_always_in_stock(entity) {
                continue;
            }
            if self.checker.is_in_stock(entity, locations) {
                continue;
            }
            debug!(
                item = %item.id,
                entity = %entity.label,
                order = %order.id,
                "queueing removal of reserved out-of-stock item"
            );
            ids.push(item.id);
        }
        ids
    }
}
