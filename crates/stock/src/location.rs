//! Stock locations.

use serde::{Deserialize, Serialize};

use cartstock_core::LocationId;

/// A location stock is held at (e.g. a warehouse).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLocation {
    pub id: LocationId,
    pub name: String,
}

impl StockLocation {
    pub fn new(id: LocationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
