//! Price level aggregate for one price tick on one side.
//!
//! ## Design
//!
//! A `PriceLevel` does not hold orders. It holds the two aggregates the
//! book answers queries from: the total resting quantity and the number of
//! live orders at the price. Individual order quantities live in the
//! order-location index.
//!
//! ## Mutations
//!
//! The counters are private and change only through three methods:
//!
//! | Method | total_quantity | order_count |
//! |--------|----------------|-------------|
//! | [`apply_new_order`](PriceLevel::apply_new_order) | `+= qty` | `+= 1` |
//! | [`apply_amend`](PriceLevel::apply_amend) | `+= new - old` | unchanged |
//! | [`apply_delete`](PriceLevel::apply_delete) | `-= qty` | `-= 1` |
//!
//! With non-zero order quantities, and totals that never exceed `u64::MAX`
//! (see [`checked_total`](PriceLevel::checked_total)), this keeps
//! `order_count == 0 <=> total_quantity == 0`.

use ssz_rs::prelude::*;

use crate::types::{Price, Quantity};

/// Aggregate of all resting orders at a single price on one side.
///
/// A zero-valued level (`PriceLevel::EMPTY`) is the "no market" sentinel
/// returned by `top_of_book` for an empty side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, SimpleSerialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceLevel {
    price: u64,
    total_quantity: u64,
    order_count: u64,
}

impl PriceLevel {
    /// The all-zero sentinel level
    pub const EMPTY: PriceLevel = PriceLevel::new(0);

    /// Create a new empty price level
    pub const fn new(price: Price) -> Self {
        Self {
            price,
            total_quantity: 0,
            order_count: 0,
        }
    }

    /// Price of this level in ticks
    #[inline]
    pub fn price(&self) -> Price {
        self.price
    }

    /// Sum of live order quantities at this price
    #[inline]
    pub fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    /// Number of live orders at this price
    #[inline]
    pub fn order_count(&self) -> u64 {
        self.order_count
    }

    /// Check if the price level holds no live orders
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Whether this is the zero-valued "no market" sentinel
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Total after `retired` leaves and `added` arrives, or `None` if it
    /// would not fit in a `Quantity`.
    ///
    /// The apply methods expect callers to have checked this first.
    #[inline]
    pub fn checked_total(&self, retired: Quantity, added: Quantity) -> Option<Quantity> {
        self.total_quantity.checked_sub(retired)?.checked_add(added)
    }

    /// Rest a new order of `quantity` at this level
    #[inline]
    pub fn apply_new_order(&mut self, quantity: Quantity) {
        debug_assert!(self.checked_total(0, quantity).is_some(), "level total overflow");
        self.total_quantity = self.total_quantity.saturating_add(quantity);
        self.order_count += 1;
    }

    /// Resize a resting order from `old_quantity` to `new_quantity`
    #[inline]
    pub fn apply_amend(&mut self, old_quantity: Quantity, new_quantity: Quantity) {
        debug_assert!(self.order_count > 0, "amend on an empty level");
        debug_assert!(
            self.checked_total(old_quantity, new_quantity).is_some(),
            "level total overflow"
        );
        self.total_quantity = self
            .total_quantity
            .saturating_sub(old_quantity)
            .saturating_add(new_quantity);
    }

    /// Remove a resting order of `quantity` from this level
    #[inline]
    pub fn apply_delete(&mut self, quantity: Quantity) {
        debug_assert!(self.order_count > 0, "delete on an empty level");
        debug_assert!(self.total_quantity >= quantity);
        self.total_quantity = self.total_quantity.saturating_sub(quantity);
        self.order_count = self.order_count.saturating_sub(1);
    }

    /// Whether the level satisfies `order_count == 0 <=> total_quantity == 0`
    #[inline]
    pub fn is_consistent(&self) -> bool {
        (self.order_count == 0) == (self.total_quantity == 0)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
