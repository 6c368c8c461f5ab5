//! Purchasable entities.

use serde::{Deserialize, Serialize};

use cartstock_core::PurchasableId;

/// A purchasable entity (e.g. a product variation) referenced by an order item.
///
/// Whether inventory tracking applies to it at all is not a property of the
/// entity itself; it is resolved through the external
/// [`StockControlChecker`](crate::services::StockControlChecker).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchasableEntity {
    pub id: PurchasableId,
    pub label: String,
}

impl PurchasableEntity {
    pub fn new(id: PurchasableId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}
