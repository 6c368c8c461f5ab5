//! `cartstock-expiration` — the sweep-and-queue pipeline for abandoned carts.
//!
//! A scheduler tick drives [`CartExpirationScanner`], which finds stale cart
//! orders holding reserved, out-of-stock items and queues their item ids.
//! [`CartExpirationWorker`] consumes those batches, re-validates each item
//! against freshly loaded state, and removes the ones that still qualify.
//! The queue decouples the two; at-least-once delivery is tolerated because
//! the worker is idempotent per item.

pub mod queue;
pub mod scanner;
pub mod worker;

pub use queue::{ExpirationBatch, ExpirationQueue, QueueError};
pub use scanner::CartExpirationScanner;
pub use worker::CartExpirationWorker;
