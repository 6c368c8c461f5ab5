//! Collaborator seams into the external stock subsystem.
//!
//! Every collaborator is an explicit trait object passed in by the host;
//! nothing here is looked up through ambient global state.

use thiserror::Error;

use cartstock_core::{PurchasableId, TransactionId};

use crate::location::StockLocation;
use crate::purchasable::PurchasableEntity;
use crate::transaction::{SaleContext, StockEventType, TransactionMetadata, TransactionType};

/// Errors surfaced by the stock seam.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockError {
    /// No location could be resolved for a transaction.
    #[error("no stock location available for {0}")]
    NoLocation(PurchasableId),

    /// The stock ledger rejected or could not create a transaction.
    ///
    /// The triggering order mutation has already been persisted by the host,
    /// so this is surfaced to the caller rather than rolled back. No retry.
    #[error("stock transaction rejected: {0}")]
    Rejected(String),
}

/// Decides whether inventory tracking applies to an entity at all.
pub trait StockControlChecker: Send + Sync {
    fn is_stock_controlled(&self, entity: &PurchasableEntity) -> bool;
}

/// Per-entity stock availability checks.
pub trait StockChecker: Send + Sync {
    /// True for entities that are never inventory-managed ("always in stock").
    fn is_always_in_stock(&self, entity: &PurchasableEntity) -> bool;

    /// True when the entity is in stock at any of the given locations.
    fn is_in_stock(&self, entity: &PurchasableEntity, locations: &[StockLocation]) -> bool;
}

/// Access to the set of known stock locations.
pub trait StockLocationStore: Send + Sync {
    fn load_all(&self) -> Vec<StockLocation>;
}

/// Resolves the fulfillment location for a transaction.
pub trait LocationResolver: Send + Sync {
    fn transaction_location(
        &self,
        context: &SaleContext,
        entity: &PurchasableEntity,
        quantity: i64,
    ) -> Option<StockLocation>;
}

/// The external stock ledger transactions are handed to.
pub trait TransactionSink: Send + Sync {
    #[allow(clippy::too_many_arguments)]
    fn record(
        &self,
        context: &SaleContext,
        entity: &PurchasableEntity,
        event_type: StockEventType,
        quantity: i64,
        location: &StockLocation,
        transaction_type: TransactionType,
        metadata: TransactionMetadata,
    ) -> Result<TransactionId, StockError>;
}
