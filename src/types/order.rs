//! Order input types for the order book.
//!
//! ## Representation
//!
//! Prices are integer tick counts and quantities are integer lots.
//! Nothing in the book ever compares floating-point values; decimal
//! prices are converted once at the boundary (see [`crate::types::price`]).
//!
//! An [`Order`] is only an input record. The book keeps its side, price
//! and quantity in the order-location index and folds the quantity into
//! the matching price level; the `Order` itself is not stored.

/// Unique order identifier, supplied by the caller.
pub type OrderId = u64;

/// Price in integer ticks. Zero is reserved as the "no market" sentinel.
pub type Price = u64;

/// Quantity in integer lots. Must be non-zero for a live order.
pub type Quantity = u64;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
///
/// Encoded as u8 inside state roots:
/// - Buy = 0
/// - Sell = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Buy order (bid) - best level is the highest price
    #[default]
    Buy,
    /// Sell order (ask) - best level is the lowest price
    Sell,
}

impl Side {
    /// Convert to u8 for encoding
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Whether `candidate` has strictly better priority than `incumbent`
    /// on this side: higher for bids, lower for asks.
    #[inline]
    pub fn is_better(self, candidate: Price, incumbent: Price) -> bool {
        match self {
            Side::Buy => candidate > incumbent,
            Side::Sell => candidate < incumbent,
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A limit order submitted to the book.
///
/// ## Example
///
/// ```
/// use tickbook::types::{Order, Side};
///
/// let order = Order::new(1, Side::Sell, 10_000, 5);
/// assert_eq!(order.side, Side::Sell);
/// assert_eq!(order, Order::sell(1, 10_000, 5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    /// Unique order identifier
    pub id: OrderId,

    /// Side of the book the order rests on
    pub side: Side,

    /// Limit price in ticks
    pub price: Price,

    /// Resting quantity
    pub quantity: Quantity,
}

impl Order {
    /// Create a new limit order
    ///
    /// # Arguments
    ///
    /// * `id` - Unique order identifier
    /// * `side` - Buy or Sell
    /// * `price` - Price in ticks
    /// * `quantity` - Quantity in lots
    pub const fn new(id: OrderId, side: Side, price: Price, quantity: Quantity) -> Self {
        Self { id, side, price, quantity }
    }

    /// Shorthand for a buy order
    pub const fn buy(id: OrderId, price: Price, quantity: Quantity) -> Self {
        Self::new(id, Side::Buy, price, quantity)
    }

    /// Shorthand for a sell order
    pub const fn sell(id: OrderId, price: Price, quantity: Quantity) -> Self {
        Self::new(id, Side::Sell, price, quantity)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
