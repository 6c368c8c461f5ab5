//! `cartstock-stock` — stock-side vocabulary for cart reservations.
//!
//! Defines the purchasable entity and stock location carried on order items,
//! the transaction types handed to the external stock ledger, the collaborator
//! seams the reactor and scanner depend on, and the pure movement decider that
//! maps cart lifecycle changes to signed stock transactions.

pub mod location;
pub mod movement;
pub mod purchasable;
pub mod services;
pub mod transaction;

pub use location::StockLocation;
pub use movement::StockMovement;
pub use purchasable::PurchasableEntity;
pub use services::{
    LocationResolver, StockChecker, StockControlChecker, StockError, StockLocationStore,
    TransactionSink,
};
pub use transaction::{SaleContext, StockEventType, TransactionMetadata, TransactionType};
