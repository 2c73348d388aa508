//! Core value types for tickbook
//!
//! ## Types
//!
//! - [`Order`]: A limit order submitted to the book
//! - [`Side`]: Buy or Sell
//! - [`BookDigest`]: Fingerprint of book contents (state root)
//!
//! ## Integer Prices
//!
//! Prices are `u64` tick counts and quantities are `u64` lots.
//! Use [`price`] to convert decimal prices at the boundary.

mod order;
mod digest;
pub mod price;

pub use order::{Order, OrderId, Price, Quantity, Side};
pub use digest::BookDigest;
