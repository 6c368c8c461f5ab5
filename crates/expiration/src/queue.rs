//! The expiration work queue seam.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use cartstock_core::OrderItemId;

/// One source order's expirable item ids, queued as a unit.
///
/// The scanner never enqueues an empty batch. The payload is opaque to the
/// queue backend; it only has to come back intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpirationBatch(Vec<OrderItemId>);

impl ExpirationBatch {
    pub fn new(ids: Vec<OrderItemId>) -> Self {
        Self(ids)
    }

    pub fn ids(&self) -> &[OrderItemId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Queue backend failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("queue backend failure: {0}")]
    Backend(String),
}

/// The host's work queue.
///
/// Delivery is at-least-once; consumers must support independent per-item
/// failure without requeueing the whole batch.
pub trait ExpirationQueue: Send + Sync {
    fn enqueue(&self, batch: ExpirationBatch) -> Result<(), QueueError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_survives_queue_serialization() {
        let batch = ExpirationBatch::new(vec![OrderItemId::new(), OrderItemId::new()]);
        let payload = serde_json::to_string(&batch).unwrap();
        let restored: ExpirationBatch = serde_json::from_str(&payload).unwrap();
        assert_eq!(batch, restored);
    }
}
