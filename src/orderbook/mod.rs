//! Order book module.
//!
//! ## Architecture
//!
//! The order book aggregates resting orders into price levels:
//!
//! - **Order index**: slab-backed map from order id to side, price and quantity
//! - **Price levels**: (price, total quantity, order count) per tick and side
//! - **Side containers**: one per side, three interchangeable strategies
//!
//! ## Components
//!
//! - [`PriceLevel`]: Aggregate of all orders at a single price
//! - [`OrderIndex`]: O(1) order id to [`OrderLocation`] lookup
//! - [`SideBook`]: Storage strategy contract ([`MapSide`], [`HeapSide`], [`VecSide`])
//! - [`OrderBook`]: Facade owning the index and both sides
//!
//! ## Performance
//!
//! | Operation | Map | Heap | Vector |
//! |-----------|-----|------|--------|
//! | New order | O(log n) | O(log n) | O(n) |
//! | Amend / delete | O(log n) | O(log n) | O(n) |
//! | Top of book | O(k) | O(1)* | O(n) |
//! | Count / volume at price | O(log n) | O(log n) | O(n) |
//!
//! n = retained levels on the side, k = empty levels in front of the best.
//! *Amortized; stale heap entries are purged on read.

pub mod side;
mod level;
mod index;
mod error;
mod book;

pub use level::PriceLevel;
pub use index::{OrderIndex, OrderLocation};
pub use error::{BookError, Result};
pub use side::{HeapSide, MapSide, SideBook, VecSide};
pub use book::{HeapOrderBook, MapOrderBook, OrderBook, VecOrderBook};
