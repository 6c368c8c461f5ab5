//! In-memory fan-out bus for order lifecycle events.
//!
//! The host's event wiring: mutations publish here, consumers subscribe and
//! drive an [`OrderEventHandler`](crate::events::OrderEventHandler) through
//! [`dispatch`](crate::events::dispatch). Delivery is at-least-once and
//! best-effort; handlers must tolerate duplicates.

use std::sync::{Mutex, mpsc};

use crate::events::OrderLifecycleEvent;

/// Broadcast bus: every subscriber gets a copy of every published event.
#[derive(Debug, Default)]
pub struct LifecycleBus {
    subscribers: Mutex<Vec<mpsc::Sender<OrderLifecycleEvent>>>,
}

impl LifecycleBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish an event to all live subscribers.
    ///
    /// Dead subscribers are pruned while publishing.
    pub fn publish(&self, event: OrderLifecycleEvent) {
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.retain(|tx| tx.send(event.clone()).is_ok());
        }
    }

    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }
        Subscription { receiver: rx }
    }
}

/// A subscription to the lifecycle event stream.
///
/// Designed for single-threaded consumption: one subscription per consumer.
#[derive(Debug)]
pub struct Subscription {
    receiver: mpsc::Receiver<OrderLifecycleEvent>,
}

impl Subscription {
    /// The next pending event, if any, without blocking.
    pub fn try_next(&self) -> Option<OrderLifecycleEvent> {
        self.receiver.try_recv().ok()
    }

    /// All pending events, in publication order.
    pub fn drain(&self) -> Vec<OrderLifecycleEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_next() {
            events.push(event);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use cartstock_core::{CustomerId, OrderTypeId, StoreId};

    use crate::order::Order;

    fn placed_event() -> OrderLifecycleEvent {
        OrderLifecycleEvent::Placed {
            order: Order::new(
                OrderTypeId::from("default"),
                CustomerId::new(),
                StoreId::new(),
                Utc::now(),
            ),
        }
    }

    #[test]
    fn every_subscriber_sees_every_event() {
        let bus = LifecycleBus::new();
        let first = bus.subscribe();
        let second = bus.subscribe();

        bus.publish(placed_event());

        assert_eq!(first.drain().len(), 1);
        assert_eq!(second.drain().len(), 1);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let bus = LifecycleBus::new();
        drop(bus.subscribe());
        let live = bus.subscribe();

        bus.publish(placed_event());
        bus.publish(placed_event());

        assert_eq!(live.drain().len(), 2);
    }
}
