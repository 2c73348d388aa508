//! Errors reported by order book operations.
//!
//! Every failure is local and recoverable: a rejected operation leaves the
//! book exactly as it was.

use thiserror::Error;

use crate::types::{OrderId, Quantity};

/// Order book operation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    /// Amend or delete referenced an identifier that is not active
    #[error("order {0} not found")]
    NotFound(OrderId),

    /// New order or amend with a zero quantity
    #[error("order {id}: invalid quantity {quantity}")]
    InvalidQuantity { id: OrderId, quantity: Quantity },

    /// New order at price zero, which is reserved as the empty-side sentinel
    #[error("order {id}: price 0 is reserved for an empty side")]
    InvalidPrice { id: OrderId },

    /// New order reused an identifier that is still active
    #[error("order {0} is already active")]
    DuplicateOrder(OrderId),

    /// New order or amend would push the volume at its price past `u64::MAX`
    #[error("order {id}: volume at its price would overflow")]
    QuantityOverflow { id: OrderId },

    /// State root encoding failed
    #[error("state encoding failed: {0}")]
    Encoding(String),
}

/// Result alias for order book operations
pub type Result<T> = std::result::Result<T, BookError>;
