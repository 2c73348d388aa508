//! Book digest: a compact fingerprint of the order book state.
//!
//! The digest pairs a few counters with a 32-byte state root. Two books
//! holding the same live levels produce the same state root no matter which
//! side storage strategy they use or how many emptied levels they retain,
//! which makes the digest the cheapest way to compare books after replaying
//! the same event stream.

use sha2::{Digest, Sha256};
use ssz_rs::prelude::*;

/// Fingerprint of an order book at a point in its event stream.
///
/// ## Example
///
/// ```
/// use tickbook::types::BookDigest;
///
/// let digest = BookDigest::new(10, 4, BookDigest::compute_hash(b"levels"));
/// assert_eq!(digest.state_root_hex().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct BookDigest {
    /// Number of mutations successfully applied to the book
    pub ops_applied: u64,

    /// Number of active orders in the book
    pub active_orders: u64,

    /// SHA-256 over the SSZ encoding of every live level, best first
    pub state_root: [u8; 32],
}

impl BookDigest {
    /// Create a digest from its parts
    pub fn new(ops_applied: u64, active_orders: u64, state_root: [u8; 32]) -> Self {
        Self {
            ops_applied,
            active_orders,
            state_root,
        }
    }

    /// Compute SHA-256 hash of the given data
    pub fn compute_hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }

    /// Get the state root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }

    /// Check if the digest describes a book with no active orders
    pub fn is_empty(&self) -> bool {
        self.active_orders == 0
    }

    /// Whether two digests describe the same book contents.
    ///
    /// The op counter is ignored: a book that added and then deleted an
    /// order holds the same contents as one that never saw it.
    pub fn same_state(&self, other: &Self) -> bool {
        self.state_root == other.state_root && self.active_orders == other.active_orders
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
