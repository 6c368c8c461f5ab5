//! The movement decider: cart lifecycle change → signed stock transaction.
//!
//! Pure decision logic, no IO. Sign convention follows the stock ledger:
//! OUT movements carry a negative quantity, IN movements a positive one.

use serde::{Deserialize, Serialize};

use crate::transaction::TransactionType;

/// A decided stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub transaction_type: TransactionType,
    /// Signed quantity: negative for OUT, positive for IN.
    pub quantity: i64,
}

impl StockMovement {
    /// Reserve stock for an item entering a cart.
    pub fn reserve(quantity: i64) -> Self {
        Self {
            transaction_type: TransactionType::Out,
            quantity: -quantity,
        }
    }

    /// Return previously reserved stock (order placed/cancelled/deleted,
    /// item removed).
    pub fn release(quantity: i64) -> Self {
        Self {
            transaction_type: TransactionType::In,
            quantity,
        }
    }

    /// Movement for a cart item quantity change.
    ///
    /// With `diff = original - current`: an increase reserves the added units
    /// (OUT of the difference), a decrease returns them (IN of the
    /// difference). No movement when the quantity is unchanged.
    pub fn quantity_change(original: i64, current: i64) -> Option<Self> {
        let diff = original - current;
        match diff {
            0 => None,
            d if d < 0 => Some(Self {
                transaction_type: TransactionType::Out,
                quantity: d,
            }),
            d => Some(Self {
                transaction_type: TransactionType::In,
                quantity: d,
            }),
        }
    }

    /// Number of units moved, unsigned.
    pub fn magnitude(&self) -> i64 {
        self.quantity.abs()
    }
}
