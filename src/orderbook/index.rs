//! Order-to-location index.
//!
//! ## Design
//!
//! Maps an order identifier to where the order rests: its side, its price
//! and the quantity it last contributed to that level. Amend and delete
//! resolve the level through this index instead of scanning the book.
//!
//! ## Slab Integration
//!
//! Entries live in a `Slab` and the hash map stores slab keys:
//! - Keys are `usize` values returned by `slab.insert()`
//! - Keys may be reused after `slab.remove()`
//! - O(1) insert, remove, and lookup
//!
//! Pre-sizing both with the expected order count keeps the hot path free
//! of reallocation until the hint is exceeded.

use std::collections::HashMap;

use slab::Slab;

use crate::types::{OrderId, Price, Quantity, Side};

/// Where an active order rests and how much it contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderLocation {
    /// Side of the book
    pub side: Side,

    /// Price level in ticks
    pub price: Price,

    /// Quantity currently counted in the level's total
    pub quantity: Quantity,
}

impl OrderLocation {
    /// Create a location entry
    #[inline]
    pub const fn new(side: Side, price: Price, quantity: Quantity) -> Self {
        Self { side, price, quantity }
    }
}

/// Hash index from order id to [`OrderLocation`].
#[derive(Debug, Default)]
pub struct OrderIndex {
    /// Location storage
    entries: Slab<OrderLocation>,

    /// Order ID to slab key
    keys: HashMap<OrderId, usize>,
}

impl OrderIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index pre-sized for `capacity` orders
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Slab::with_capacity(capacity),
            keys: HashMap::with_capacity(capacity),
        }
    }

    /// Number of recorded orders
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no order is recorded
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Pre-allocated entry slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Whether `id` is recorded
    #[inline]
    pub fn contains(&self, id: OrderId) -> bool {
        self.keys.contains_key(&id)
    }

    /// Record where `id` rests.
    ///
    /// Returns the previous location if `id` was already recorded; the
    /// caller is responsible for retiring that quantity from its level.
    pub fn record(&mut self, id: OrderId, location: OrderLocation) -> Option<OrderLocation> {
        if let Some(entry) = self.keys.get(&id).and_then(|&key| self.entries.get_mut(key)) {
            return Some(std::mem::replace(entry, location));
        }

        let key = self.entries.insert(location);
        self.keys.insert(id, key);
        None
    }

    /// Look up where `id` rests
    #[inline]
    pub fn locate(&self, id: OrderId) -> Option<OrderLocation> {
        let key = *self.keys.get(&id)?;
        self.entries.get(key).copied()
    }

    /// Set the recorded quantity of `id`, returning the old quantity
    pub fn update(&mut self, id: OrderId, quantity: Quantity) -> Option<Quantity> {
        let key = *self.keys.get(&id)?;
        let entry = self.entries.get_mut(key)?;
        Some(std::mem::replace(&mut entry.quantity, quantity))
    }

    /// Forget `id`, returning its last location
    pub fn erase(&mut self, id: OrderId) -> Option<OrderLocation> {
        let key = self.keys.remove(&id)?;
        self.entries.try_remove(key)
    }

    /// Iterate over all recorded `(id, location)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (OrderId, OrderLocation)> + '_ {
        self.keys
            .iter()
            .filter_map(|(&id, &key)| self.entries.get(key).map(|location| (id, *location)))
    }

    /// Forget every order
    pub fn clear(&mut self) {
        self.entries.clear();
        self.keys.clear();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
