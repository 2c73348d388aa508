//! Construction-time configuration for an order book.
//!
//! Everything here is a sizing hint or a policy switch. None of it changes
//! what `top_of_book`, `order_count` or `total_volume` return for a given
//! stream of valid, non-duplicate events.

/// Default number of order identifiers the index is pre-sized for.
pub const DEFAULT_EXPECTED_ORDERS: usize = 1_000_000;

/// Default number of price levels pre-allocated per side.
pub const DEFAULT_EXPECTED_LEVELS: usize = 256;

/// What `new_order` does when the identifier is already active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DuplicatePolicy {
    /// Refuse the new order with `BookError::DuplicateOrder`
    #[default]
    Reject,
    /// Retire the resting order first, then accept the new one
    Replace,
}

/// Order book configuration
///
/// ## Example
///
/// ```
/// use tickbook::{BookConfig, DuplicatePolicy};
///
/// let config = BookConfig::default()
///     .with_expected_orders(50_000)
///     .with_duplicate_policy(DuplicatePolicy::Replace);
///
/// assert_eq!(config.expected_orders, 50_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BookConfig {
    /// Expected number of distinct order identifiers.
    /// Pre-sizes the order index; exceeding it only costs reallocation.
    pub expected_orders: usize,

    /// Expected number of price levels per side.
    /// Pre-sizes strategies with contiguous level storage.
    pub expected_levels: usize,

    /// Handling of a `new_order` whose id is already active
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            expected_orders: DEFAULT_EXPECTED_ORDERS,
            expected_levels: DEFAULT_EXPECTED_LEVELS,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl BookConfig {
    /// Set the expected order count hint
    pub fn with_expected_orders(mut self, expected_orders: usize) -> Self {
        self.expected_orders = expected_orders;
        self
    }

    /// Set the expected per-side level count hint
    pub fn with_expected_levels(mut self, expected_levels: usize) -> Self {
        self.expected_levels = expected_levels;
        self
    }

    /// Set the duplicate identifier policy
    pub fn with_duplicate_policy(mut self, duplicate_policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = duplicate_policy;
        self
    }
}
