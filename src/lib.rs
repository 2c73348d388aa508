//! # tickbook
//!
//! In-memory price-level limit order book.
//!
//! ## Architecture
//!
//! The book ingests add / amend / delete events and answers "what is the
//! best bid or ask level and its aggregate size" without walking orders:
//!
//! - **Types**: Order input, Side, tick conversion, state digest
//! - **OrderBook**: facade over an order index and two side containers
//! - **Side strategies**: sorted map, heap-assisted map, flat vector
//!
//! ## Design Principles
//!
//! 1. **Integer prices**: prices are tick counts, never floating point
//! 2. **One contract, three strategies**: every strategy answers identically
//! 3. **Single writer**: mutations and top-of-book queries take `&mut self`
//! 4. **Local errors**: rejected operations return `BookError` and change nothing
//!
//! ## Example
//!
//! ```
//! use tickbook::{HeapOrderBook, Order, Side};
//!
//! let mut book = HeapOrderBook::with_capacity(1_000);
//! book.new_order(Order::buy(3, 9_999, 10)).unwrap();
//! book.amend_order(3, 7).unwrap();
//!
//! assert_eq!(book.total_volume(9_999), 7);
//! assert_eq!(book.order_count(9_999), 1);
//! assert_eq!(book.top_of_book(Side::Buy).price(), 9_999);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core value types: Order, Side, BookDigest, tick conversion
pub mod types;

/// Construction-time configuration
pub mod config;

/// Order book: facade, index, price levels and side strategies
pub mod orderbook;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use types::{BookDigest, Order, OrderId, Price, Quantity, Side};
pub use config::{BookConfig, DuplicatePolicy};
pub use orderbook::{
    BookError, HeapOrderBook, HeapSide, MapOrderBook, MapSide, OrderBook, OrderLocation,
    PriceLevel, Result, SideBook, VecOrderBook, VecSide,
};
