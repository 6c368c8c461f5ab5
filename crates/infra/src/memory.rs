//! In-memory implementations of the host seams, for tests and dev.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use cartstock_core::{
    LocationId, OrderId, OrderItemId, OrderTypeId, PurchasableId, ReserveSettings, SettingsStore,
    TransactionId,
};
use cartstock_expiration::{ExpirationBatch, ExpirationQueue, QueueError};
use cartstock_orders::{
    CartNotifier, Order, OrderItem, OrderItemStore, OrderStore, OrderTypeStore, PaymentLookup,
    StoreError,
};
use cartstock_stock::{
    LocationResolver, PurchasableEntity, SaleContext, StockChecker, StockControlChecker,
    StockError, StockEventType, StockLocation, StockLocationStore, TransactionMetadata,
    TransactionSink, TransactionType,
};

/// In-memory order and order item storage.
///
/// Orders embed their items; the item index mirrors the host keeping item
/// entities addressable (and alive) until they are explicitly deleted, even
/// after being removed from their order.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<OrderId, Order>>,
    items: RwLock<HashMap<OrderItemId, OrderItem>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Seed an order as if the host had already persisted it.
    pub fn insert(&self, order: Order) {
        {
            let mut items = self.items.write().unwrap();
            for item in order.items() {
                items.insert(item.id, item.clone());
            }
        }
        self.orders.write().unwrap().insert(order.id, order);
    }

    pub fn order_count(&self) -> usize {
        self.orders.read().unwrap().len()
    }

    pub fn item_count(&self) -> usize {
        self.items.read().unwrap().len()
    }
}

impl OrderStore for InMemoryOrderStore {
    fn load(&self, id: OrderId) -> Option<Order> {
        self.orders.read().unwrap().get(&id).cloned()
    }

    fn load_unchanged(&self, id: OrderId) -> Option<Order> {
        // No cache layer in front of this store; a fresh load is a load.
        self.load(id)
    }

    fn save(&self, order: &Order) -> Result<(), StoreError> {
        {
            let mut items = self.items.write().unwrap();
            for item in order.items() {
                items.insert(item.id, item.clone());
            }
        }
        self.orders
            .write()
            .unwrap()
            .insert(order.id, order.clone());
        Ok(())
    }

    fn delete(&self, id: OrderId) -> Result<(), StoreError> {
        self.orders
            .write()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    fn expired_cart_ids(&self, order_type: &OrderTypeId, cutoff: DateTime<Utc>) -> Vec<OrderId> {
        let orders = self.orders.read().unwrap();
        let mut matching: Vec<&Order> = orders
            .values()
            .filter(|o| o.cart && o.order_type == *order_type && o.changed <= cutoff)
            .collect();
        matching.sort_by_key(|o| (o.changed, Uuid::from(o.id)));
        matching.iter().map(|o| o.id).collect()
    }
}

impl OrderItemStore for InMemoryOrderStore {
    fn load_unchanged(&self, id: OrderItemId) -> Option<OrderItem> {
        self.items.read().unwrap().get(&id).cloned()
    }

    fn delete(&self, id: OrderItemId) -> Result<(), StoreError> {
        self.items
            .write()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

impl OrderTypeStore for InMemoryOrderStore {
    fn all(&self) -> Vec<OrderTypeId> {
        let orders = self.orders.read().unwrap();
        let types: BTreeSet<OrderTypeId> =
            orders.values().map(|o| o.order_type.clone()).collect();
        types.into_iter().collect()
    }
}

/// In-memory work queue with consumer access for tests.
#[derive(Debug, Default)]
pub struct InMemoryQueue {
    batches: Mutex<VecDeque<ExpirationBatch>>,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Claim the oldest queued batch.
    pub fn pop(&self) -> Option<ExpirationBatch> {
        self.batches.lock().unwrap().pop_front()
    }

    pub fn len(&self) -> usize {
        self.batches.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.lock().unwrap().is_empty()
    }
}

impl ExpirationQueue for InMemoryQueue {
    fn enqueue(&self, batch: ExpirationBatch) -> Result<(), QueueError> {
        self.batches.lock().unwrap().push_back(batch);
        Ok(())
    }
}

/// One transaction as handed to the stock ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTransaction {
    pub context: SaleContext,
    pub entity_id: PurchasableId,
    pub event_type: StockEventType,
    pub quantity: i64,
    pub location_id: LocationId,
    pub transaction_type: TransactionType,
    pub metadata: TransactionMetadata,
}

/// A transaction sink that records everything, optionally rejecting.
#[derive(Debug, Default)]
pub struct RecordingSink {
    transactions: Mutex<Vec<RecordedTransaction>>,
    reject_with: Mutex<Option<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Make every subsequent `record` call fail.
    pub fn reject_with(&self, reason: impl Into<String>) {
        *self.reject_with.lock().unwrap() = Some(reason.into());
    }

    pub fn recorded(&self) -> Vec<RecordedTransaction> {
        self.transactions.lock().unwrap().clone()
    }

    /// Net signed movement for one entity across all recorded transactions.
    pub fn net_movement(&self, entity_id: PurchasableId) -> i64 {
        self.transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.entity_id == entity_id)
            .map(|t| t.quantity)
            .sum()
    }
}

impl TransactionSink for RecordingSink {
    fn record(
        &self,
        context: &SaleContext,
        entity: &PurchasableEntity,
        event_type: StockEventType,
        quantity: i64,
        location: &StockLocation,
        transaction_type: TransactionType,
        metadata: TransactionMetadata,
    ) -> Result<TransactionId, StockError> {
        if let Some(reason) = self.reject_with.lock().unwrap().clone() {
            return Err(StockError::Rejected(reason));
        }
        self.transactions.lock().unwrap().push(RecordedTransaction {
            context: *context,
            entity_id: entity.id,
            event_type,
            quantity,
            location_id: location.id,
            transaction_type,
            metadata,
        });
        Ok(TransactionId::new())
    }
}

/// Stock availability driven by explicit per-entity marks.
///
/// Entities start out of stock everywhere; tests mark them in stock or
/// always-in-stock as needed.
#[derive(Debug, Default)]
pub struct StaticStockChecker {
    always_in_stock: RwLock<HashSet<PurchasableId>>,
    in_stock: RwLock<HashSet<PurchasableId>>,
}

impl StaticStockChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn mark_always_in_stock(&self, id: PurchasableId) {
        self.always_in_stock.write().unwrap().insert(id);
    }

    pub fn mark_in_stock(&self, id: PurchasableId) {
        self.in_stock.write().unwrap().insert(id);
    }
}

impl StockChecker for StaticStockChecker {
    fn is_always_in_stock(&self, entity: &PurchasableEntity) -> bool {
        self.always_in_stock.read().unwrap().contains(&entity.id)
    }

    fn is_in_stock(&self, entity: &PurchasableEntity, locations: &[StockLocation]) -> bool {
        !locations.is_empty() && self.in_stock.read().unwrap().contains(&entity.id)
    }
}

/// Treats every entity as stock controlled unless explicitly exempted.
#[derive(Debug, Default)]
pub struct StaticStockControl {
    exempt: RwLock<HashSet<PurchasableId>>,
}

impl StaticStockControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn exempt(&self, id: PurchasableId) {
        self.exempt.write().unwrap().insert(id);
    }
}

impl StockControlChecker for StaticStockControl {
    fn is_stock_controlled(&self, entity: &PurchasableEntity) -> bool {
        !self.exempt.read().unwrap().contains(&entity.id)
    }
}

/// A fixed set of stock locations; the first doubles as the transaction
/// location for every resolution.
#[derive(Debug)]
pub struct FixedLocations {
    locations: Vec<StockLocation>,
}

impl FixedLocations {
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            locations: vec![StockLocation::new(LocationId::new(), name)],
        }
    }

    pub fn arc_single(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::single(name))
    }
}

impl StockLocationStore for FixedLocations {
    fn load_all(&self) -> Vec<StockLocation> {
        self.locations.clone()
    }
}

impl LocationResolver for FixedLocations {
    fn transaction_location(
        &self,
        _context: &SaleContext,
        _entity: &PurchasableEntity,
        _quantity: i64,
    ) -> Option<StockLocation> {
        self.locations.first().cloned()
    }
}

/// Mutable in-memory settings, for tests flipping configuration mid-flow.
#[derive(Debug, Default)]
pub struct InMemorySettings {
    settings: RwLock<ReserveSettings>,
}

impl InMemorySettings {
    pub fn new(settings: ReserveSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }

    pub fn arc(settings: ReserveSettings) -> Arc<Self> {
        Arc::new(Self::new(settings))
    }

    pub fn update(&self, mutate: impl FnOnce(&mut ReserveSettings)) {
        mutate(&mut self.settings.write().unwrap());
    }
}

impl SettingsStore for InMemorySettings {
    fn load(&self) -> ReserveSettings {
        self.settings.read().unwrap().clone()
    }
}

/// In-memory payment records keyed by order.
#[derive(Debug, Default)]
pub struct InMemoryPayments {
    counts: RwLock<HashMap<OrderId, u64>>,
}

impl InMemoryPayments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn record_payment(&self, order_id: OrderId) {
        *self.counts.write().unwrap().entry(order_id).or_insert(0) += 1;
    }
}

impl PaymentLookup for InMemoryPayments {
    fn count_payments(&self, order_id: OrderId) -> u64 {
        self.counts
            .read()
            .unwrap()
            .get(&order_id)
            .copied()
            .unwrap_or(0)
    }
}

/// Collects user-facing notices instead of displaying them.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    messages: Mutex<Vec<String>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl CartNotifier for CollectingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
