//! Order book facade.
//!
//! ## Architecture
//!
//! The book owns three things:
//!
//! - **OrderIndex**: order id to (side, price, quantity), for O(1) amend/delete
//! - **Bids**: a [`SideBook`] holding buy levels (best = highest price)
//! - **Asks**: a [`SideBook`] holding sell levels (best = lowest price)
//!
//! The side storage strategy is a type parameter, so the three strategies
//! share one facade and one test suite.
//!
//! ## Order Lifecycle
//!
//! ```text
//! Absent --new_order--> Active --amend_order--> Active
//!                         |
//!                         +----delete_order---> Absent
//! ```
//!
//! A rejected operation changes nothing.
//!
//! ## Ownership
//!
//! Every mutation, and `top_of_book` (which may purge a strategy's cache),
//! takes `&mut self`: the book has exactly one writer at a time. Aggregate
//! lookups by price take `&self`. The book is `Send`; wrap it in a lock to
//! share it between threads.
//!
//! ## Example
//!
//! ```
//! use tickbook::{MapOrderBook, Order, Side};
//!
//! let mut book = MapOrderBook::with_capacity(1_000);
//!
//! book.new_order(Order::sell(1, 10_000, 5)).unwrap();
//! book.new_order(Order::sell(2, 10_001, 3)).unwrap();
//!
//! let top = book.top_of_book(Side::Sell);
//! assert_eq!(top.price(), 10_000);
//! assert_eq!(top.total_quantity(), 5);
//!
//! book.delete_order(1).unwrap();
//! assert_eq!(book.top_of_book(Side::Sell).price(), 10_001);
//! ```

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::config::{BookConfig, DuplicatePolicy};
use crate::orderbook::side::{HeapSide, MapSide, SideBook, VecSide};
use crate::orderbook::{BookError, OrderIndex, OrderLocation, PriceLevel, Result};
use crate::types::{BookDigest, Order, OrderId, Price, Quantity, Side};

/// Price-level limit order book, generic over the side storage strategy
#[derive(Debug)]
pub struct OrderBook<S: SideBook = MapSide> {
    config: BookConfig,

    /// Order ID to resting location
    index: OrderIndex,

    /// Buy levels
    bids: S,

    /// Sell levels
    asks: S,

    /// Active bid orders
    bid_count: usize,

    /// Active ask orders
    ask_count: usize,

    /// Successful mutations
    ops_applied: u64,
}

/// Order book using the sorted-map strategy
pub type MapOrderBook = OrderBook<MapSide>;

/// Order book using the heap-assisted strategy
pub type HeapOrderBook = OrderBook<HeapSide>;

/// Order book using the flat-vector strategy
pub type VecOrderBook = OrderBook<VecSide>;

impl<S: SideBook> Default for OrderBook<S> {
    fn default() -> Self {
        Self::new(BookConfig::default())
    }
}

impl<S: SideBook> OrderBook<S> {
    /// Create an empty book
    pub fn new(config: BookConfig) -> Self {
        Self {
            index: OrderIndex::with_capacity(config.expected_orders),
            bids: S::new(Side::Buy, &config),
            asks: S::new(Side::Sell, &config),
            bid_count: 0,
            ask_count: 0,
            ops_applied: 0,
            config,
        }
    }

    /// Create a book pre-sized for `expected_orders` identifiers
    ///
    /// ```
    /// use tickbook::HeapOrderBook;
    ///
    /// let book = HeapOrderBook::with_capacity(100_000);
    /// assert!(book.capacity() >= 100_000);
    /// ```
    pub fn with_capacity(expected_orders: usize) -> Self {
        Self::new(BookConfig::default().with_expected_orders(expected_orders))
    }

    /// The configuration this book was built with
    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    /// Name of the side storage strategy
    pub fn strategy(&self) -> &'static str {
        S::NAME
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Pre-allocated order index slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.index.capacity()
    }

    /// Number of active orders
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether no order is active
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of active buy orders
    #[inline]
    pub fn bid_count(&self) -> usize {
        self.bid_count
    }

    /// Number of active sell orders
    #[inline]
    pub fn ask_count(&self) -> usize {
        self.ask_count
    }

    /// Retained levels on `side`, including empty ones
    #[inline]
    pub fn level_count(&self, side: Side) -> usize {
        self.side(side).level_count()
    }

    /// Number of successful mutations applied so far
    #[inline]
    pub fn ops_applied(&self) -> u64 {
        self.ops_applied
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Rest a new order on the book
    ///
    /// # Errors
    ///
    /// * `InvalidQuantity` - quantity is zero
    /// * `InvalidPrice` - price is zero
    /// * `DuplicateOrder` - id is active and the policy is `Reject`
    /// * `QuantityOverflow` - the volume at `price` would exceed `u64::MAX`
    ///
    /// Under `DuplicatePolicy::Replace` the resting order with the same id is
    /// retired before the new one is accepted.
    pub fn new_order(&mut self, order: Order) -> Result<()> {
        if order.quantity == 0 {
            debug!(order_id = order.id, "new order rejected: zero quantity");
            return Err(BookError::InvalidQuantity {
                id: order.id,
                quantity: order.quantity,
            });
        }
        if order.price == 0 {
            debug!(order_id = order.id, "new order rejected: zero price");
            return Err(BookError::InvalidPrice { id: order.id });
        }

        let previous = self.index.locate(order.id);
        if previous.is_some() && self.config.duplicate_policy == DuplicatePolicy::Reject {
            debug!(order_id = order.id, "new order rejected: duplicate id");
            return Err(BookError::DuplicateOrder(order.id));
        }

        // A replaced order at the same price leaves before the new one lands
        let retired = previous
            .filter(|prev| prev.price == order.price)
            .map_or(0, |prev| prev.quantity);
        if self.projected_volume(order.price, retired, order.quantity).is_none() {
            debug!(order_id = order.id, price = order.price, "new order rejected: volume overflow");
            return Err(BookError::QuantityOverflow { id: order.id });
        }

        if let Some(previous) = previous {
            debug!(
                order_id = order.id,
                old_price = previous.price,
                old_quantity = previous.quantity,
                "replacing resting order with duplicate id"
            );
            self.retire(order.id, previous);
        }

        self.side_mut(order.side)
            .upsert_level(order.price)
            .apply_new_order(order.quantity);
        self.index.record(
            order.id,
            OrderLocation::new(order.side, order.price, order.quantity),
        );
        *self.count_mut(order.side) += 1;
        self.ops_applied += 1;
        Ok(())
    }

    /// Resize a resting order, returning its previous quantity
    ///
    /// The order keeps its level; the level total moves by the difference.
    ///
    /// # Errors
    ///
    /// * `NotFound` - id is not active
    /// * `InvalidQuantity` - `new_quantity` is zero (use `delete_order`)
    /// * `QuantityOverflow` - the volume at the order's price would exceed `u64::MAX`
    pub fn amend_order(&mut self, id: OrderId, new_quantity: Quantity) -> Result<Quantity> {
        let Some(location) = self.index.locate(id) else {
            debug!(order_id = id, "amend rejected: unknown order");
            return Err(BookError::NotFound(id));
        };
        if new_quantity == 0 {
            debug!(order_id = id, "amend rejected: zero quantity");
            return Err(BookError::InvalidQuantity {
                id,
                quantity: new_quantity,
            });
        }
        if self
            .projected_volume(location.price, location.quantity, new_quantity)
            .is_none()
        {
            debug!(order_id = id, price = location.price, "amend rejected: volume overflow");
            return Err(BookError::QuantityOverflow { id });
        }

        if let Some(level) = self.resting_level(id, location) {
            level.apply_amend(location.quantity, new_quantity);
        }
        self.index.update(id, new_quantity);
        self.ops_applied += 1;
        Ok(location.quantity)
    }

    /// Remove a resting order, returning where it rested
    ///
    /// # Errors
    ///
    /// * `NotFound` - id is not active (including a second delete)
    pub fn delete_order(&mut self, id: OrderId) -> Result<OrderLocation> {
        let Some(location) = self.index.locate(id) else {
            debug!(order_id = id, "delete rejected: unknown order");
            return Err(BookError::NotFound(id));
        };

        self.retire(id, location);
        self.ops_applied += 1;
        Ok(location)
    }

    /// Take an indexed order off its level and out of the index
    fn retire(&mut self, id: OrderId, location: OrderLocation) {
        if let Some(level) = self.resting_level(id, location) {
            level.apply_delete(location.quantity);
        }
        self.index.erase(id);
        let count = self.count_mut(location.side);
        *count = count.saturating_sub(1);
    }

    /// The level an indexed order rests on.
    ///
    /// Every indexed order has a retained level: compaction only drops empty
    /// levels. A miss means the index and the sides disagree; it is logged
    /// and the index is still updated by the caller.
    fn resting_level(&mut self, id: OrderId, location: OrderLocation) -> Option<&mut PriceLevel> {
        let level = self.side_mut(location.side).level_at_mut(location.price);
        debug_assert!(level.is_some(), "order {id} indexed without a level");
        if level.is_none() {
            warn!(order_id = id, price = location.price, "indexed order has no price level");
        }
        level
    }

    /// Volume at `price` across both sides after `retired` leaves and
    /// `added` arrives, or `None` if it does not fit in a `Quantity`
    fn projected_volume(
        &self,
        price: Price,
        retired: Quantity,
        added: Quantity,
    ) -> Option<Quantity> {
        self.total_volume(price).checked_sub(retired)?.checked_add(added)
    }

    /// Check if an order is active
    #[inline]
    pub fn contains_order(&self, id: OrderId) -> bool {
        self.index.contains(id)
    }

    /// Where an active order rests
    #[inline]
    pub fn order(&self, id: OrderId) -> Option<OrderLocation> {
        self.index.locate(id)
    }

    // ========================================================================
    // Top of Book
    // ========================================================================

    /// Best non-empty level on `side`, or the all-zero sentinel when empty.
    ///
    /// A zero price means "no market", never a level priced at zero.
    #[inline]
    pub fn top_of_book(&mut self, side: Side) -> PriceLevel {
        self.best(side).unwrap_or(PriceLevel::EMPTY)
    }

    /// Best non-empty level on `side`
    #[inline]
    pub fn best(&mut self, side: Side) -> Option<PriceLevel> {
        self.side_mut(side).best_level()
    }

    /// Best bid price
    #[inline]
    pub fn best_bid(&mut self) -> Option<Price> {
        self.bids.best_price()
    }

    /// Best ask price
    #[inline]
    pub fn best_ask(&mut self) -> Option<Price> {
        self.asks.best_price()
    }

    /// Best ask minus best bid.
    ///
    /// `None` when either side is empty or the book is crossed.
    pub fn spread(&mut self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    // ========================================================================
    // Aggregate Queries
    // ========================================================================

    /// Live orders at `price`, summed across both sides
    pub fn order_count(&self, price: Price) -> u64 {
        self.aggregate(price, PriceLevel::order_count)
    }

    /// Resting quantity at `price`, summed across both sides
    pub fn total_volume(&self, price: Price) -> Quantity {
        self.aggregate(price, PriceLevel::total_quantity)
    }

    fn aggregate(&self, price: Price, field: fn(&PriceLevel) -> u64) -> u64 {
        let bid = self.bids.level_at(price).map_or(0, field);
        let ask = self.asks.level_at(price).map_or(0, field);
        // Admission keeps the cross-side volume within u64
        bid.saturating_add(ask)
    }

    /// Level at `price` on one side, empty or not
    pub fn level(&self, side: Side, price: Price) -> Option<PriceLevel> {
        self.side(side).level_at(price).copied()
    }

    /// Up to `limit` non-empty levels on `side`, best first
    pub fn depth(&self, side: Side, limit: usize) -> Vec<PriceLevel> {
        self.side(side).depth(limit)
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Drop empty levels on both sides, returning how many were removed
    pub fn compact(&mut self) -> usize {
        let bids = self.bids.compact();
        let asks = self.asks.compact();
        debug!(strategy = S::NAME, bids, asks, "compacted empty price levels");
        bids + asks
    }

    /// Remove every order and level
    pub fn clear(&mut self) {
        self.index.clear();
        self.bids.clear();
        self.asks.clear();
        self.bid_count = 0;
        self.ask_count = 0;
    }

    /// Whether every level and the index agree.
    ///
    /// Checks `order_count == 0 <=> total_quantity == 0` on every retained
    /// level, and that each level's aggregates equal the sum of the indexed
    /// orders resting on it. O(orders + levels); meant for tests and audits.
    pub fn invariants_hold(&self) -> bool {
        use std::collections::HashMap;

        let mut expected: HashMap<(Side, Price), (Quantity, u64)> = HashMap::new();
        for (_, location) in self.index.iter() {
            let entry = expected.entry((location.side, location.price)).or_default();
            let Some(quantity) = entry.0.checked_add(location.quantity) else {
                return false;
            };
            *entry = (quantity, entry.1 + 1);
        }

        for side in [Side::Buy, Side::Sell] {
            for level in self.side(side).levels() {
                if !level.is_consistent() {
                    return false;
                }
                let (quantity, count) = expected
                    .remove(&(side, level.price()))
                    .unwrap_or_default();
                if level.total_quantity() != quantity || level.order_count() != count {
                    return false;
                }
            }
        }

        // Every indexed order must have matched a retained level
        expected.is_empty()
            && self.bid_count + self.ask_count == self.index.len()
    }

    // ========================================================================
    // State Root
    // ========================================================================

    /// SHA-256 over the SSZ encoding of every live level, best first,
    /// bids then asks, followed by the active order count.
    ///
    /// Empty retained levels do not contribute, so books with the same live
    /// contents agree regardless of strategy or compaction history.
    pub fn compute_state_root(&self) -> Result<[u8; 32]> {
        let mut hasher = Sha256::new();

        for side in [Side::Buy, Side::Sell] {
            hasher.update([side.to_u8()]);
            for level in self.side(side).depth(usize::MAX) {
                let bytes = ssz_rs::serialize(&level)
                    .map_err(|e| BookError::Encoding(format!("{e:?}")))?;
                hasher.update(&bytes);
            }
        }
        hasher.update((self.len() as u64).to_le_bytes());

        Ok(hasher.finalize().into())
    }

    /// Current [`BookDigest`]
    pub fn digest(&self) -> Result<BookDigest> {
        Ok(BookDigest::new(
            self.ops_applied,
            self.len() as u64,
            self.compute_state_root()?,
        ))
    }

    // ========================================================================
    // Side Access
    // ========================================================================

    /// Container for `side`
    #[inline]
    pub fn side(&self, side: Side) -> &S {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    #[inline]
    fn side_mut(&mut self, side: Side) -> &mut S {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    #[inline]
    fn count_mut(&mut self, side: Side) -> &mut usize {
        match side {
            Side::Buy => &mut self.bid_count,
            Side::Sell => &mut self.ask_count,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
