//! Stock transaction vocabulary.
//!
//! Transactions are produced here but owned by the external stock ledger;
//! this module only defines what gets handed across that seam.

use serde::{Deserialize, Serialize};

use cartstock_core::{CustomerId, OrderId, StoreId};

/// Direction of a stock transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Stock returned to the ledger.
    In,
    /// Stock taken from the ledger (reservation).
    Out,
}

/// The lifecycle event a transaction originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockEventType {
    OrderPlace,
    OrderUpdate,
    OrderCancel,
    OrderDelete,
    OrderItemUpdate,
    OrderItemDelete,
}

impl StockEventType {
    /// Stable identifier used by the stock ledger to attribute transactions.
    pub fn id(&self) -> &'static str {
        match self {
            StockEventType::OrderPlace => "order_place",
            StockEventType::OrderUpdate => "order_update",
            StockEventType::OrderCancel => "order_cancel",
            StockEventType::OrderDelete => "order_delete",
            StockEventType::OrderItemUpdate => "order_item_update",
            StockEventType::OrderItemDelete => "order_item_delete",
        }
    }

    /// Default transaction message recorded in the ledger metadata.
    pub fn default_message(&self) -> &'static str {
        match self {
            StockEventType::OrderPlace => "Order placed, reservation returned.",
            StockEventType::OrderUpdate => "Item added to cart, stock reserved.",
            StockEventType::OrderCancel => "Order canceled, reservation returned.",
            StockEventType::OrderDelete => "Order deleted, reservation returned.",
            StockEventType::OrderItemUpdate => "Cart item quantity changed.",
            StockEventType::OrderItemDelete => "Item removed from cart, reservation returned.",
        }
    }
}

/// Metadata attached to every recorded transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionMetadata {
    pub related_order_id: OrderId,
    pub related_customer_id: CustomerId,
    pub message: String,
}

/// The commerce context a transaction happens in: who is buying, and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleContext {
    pub customer_id: CustomerId,
    pub store_id: StoreId,
}
