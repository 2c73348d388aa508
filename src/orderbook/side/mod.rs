//! Side containers: the price levels of one side of the book.
//!
//! ## Strategies
//!
//! All three strategies satisfy the same [`SideBook`] contract and must give
//! identical answers for identical event streams. They differ only in cost:
//!
//! | Strategy | upsert_level | best_level | Storage |
//! |----------|--------------|------------|---------|
//! | [`MapSide`] | O(log n) | O(k) walk past k empty levels | `BTreeMap` |
//! | [`HeapSide`] | O(log n) | O(1) peek, amortized purge | `BTreeMap` + `BinaryHeap` |
//! | [`VecSide`] | O(n) | O(n) | `Vec` |
//!
//! ## Retained Levels
//!
//! A level is created by the first order resting at its price and is kept
//! when its last order leaves. Best-level searches skip empty levels. Call
//! [`SideBook::compact`] to drop them explicitly.

mod heap;
mod map;
mod vector;

pub use heap::HeapSide;
pub use map::MapSide;
pub use vector::VecSide;

use std::fmt;

use crate::config::BookConfig;
use crate::orderbook::PriceLevel;
use crate::types::{Price, Side};

/// Storage strategy for the price levels of one side.
///
/// Implementations are selected at compile time through the `S` parameter
/// of [`OrderBook`](crate::OrderBook).
pub trait SideBook: fmt::Debug + Send {
    /// Short strategy name used in logs and benchmark labels
    const NAME: &'static str;

    /// Create an empty container for `side`
    fn new(side: Side, config: &BookConfig) -> Self
    where
        Self: Sized;

    /// The side this container holds
    fn side(&self) -> Side;

    /// Find or create the level a new order at `price` will rest on.
    ///
    /// Callers must follow up with [`PriceLevel::apply_new_order`].
    fn upsert_level(&mut self, price: Price) -> &mut PriceLevel;

    /// Direct lookup of a retained level, empty or not
    fn level_at(&self, price: Price) -> Option<&PriceLevel>;

    /// Mutable lookup of a retained level
    fn level_at_mut(&mut self, price: Price) -> Option<&mut PriceLevel>;

    /// Best non-empty level: highest price for bids, lowest for asks.
    ///
    /// Never returns an empty level. Takes `&mut self` because a strategy
    /// may maintain a cache while answering.
    fn best_level(&mut self) -> Option<PriceLevel>;

    /// Up to `limit` non-empty levels, best first
    fn depth(&self, limit: usize) -> Vec<PriceLevel>;

    /// Every retained level, including empty ones, in no particular order
    fn levels(&self) -> Vec<PriceLevel>;

    /// Number of retained levels, including empty ones
    fn level_count(&self) -> usize;

    /// Drop empty levels, returning how many were removed
    fn compact(&mut self) -> usize;

    /// Drop every level
    fn clear(&mut self);

    /// Price of the best non-empty level
    fn best_price(&mut self) -> Option<Price> {
        self.best_level().map(|level| level.price())
    }
}

// ============================================================================
// Contract Tests (run against every strategy)
// ============================================================================
