//! `cartstock-infra` — host-side implementations of the collaborator seams.
//!
//! In-memory stores, queue and stock services for tests and development,
//! plus the evented store glue that feeds order mutations back into the
//! lifecycle bus the way the host platform does.

pub mod evented;
pub mod memory;


pub use evented::EventedOrderStore;
pub use memory::{
    CollectingNotifier, FixedLocations, InMemoryOrderStore, InMemoryPayments, InMemoryQueue,
    InMemorySettings, RecordedTransaction, RecordingSink, StaticStockChecker, StaticStockControl,
};
