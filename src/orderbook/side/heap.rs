//! Heap-assisted strategy.
//!
//! ## Design
//!
//! The ordered map of levels is the source of truth. Alongside it, a binary
//! heap of prices (max-heap for bids, min-heap for asks) caches candidates
//! for the best price, so the common-case query is a single peek.
//!
//! The heap is never touched by amend or delete. Its entries may therefore
//! name a level that has emptied or been compacted away. Such entries are
//! popped lazily when a query meets them at the top. If the heap drains, the
//! query falls back to walking the map.
//!
//! ## Cache Invariant
//!
//! Every non-empty level's price is in the heap, and no price is in it
//! twice. A `queued` set mirrors the heap's contents: a level receiving an
//! order while empty (new or revived) pushes its price only if it is not
//! already queued, and a price leaves the set when it is purged. A price is
//! only popped after being observed empty or gone, so the top of the heap
//! after purging is the true best price. The heap never holds more entries
//! than there are distinct prices seen since their last purge, however long
//! a run of writes goes without a read.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, HashSet};

use tracing::trace;

use super::map::{compact_map, ordered_depth, scan_best};
use super::SideBook;
use crate::config::BookConfig;
use crate::orderbook::PriceLevel;
use crate::types::{Price, Side};

/// Best-price candidates, ordered so the top is the best price for the side
#[derive(Debug)]
enum Candidates {
    /// Bids: highest price on top
    Max(BinaryHeap<Price>),
    /// Asks: lowest price on top
    Min(BinaryHeap<Reverse<Price>>),
}

impl Candidates {
    fn for_side(side: Side, capacity: usize) -> Self {
        match side {
            Side::Buy => Candidates::Max(BinaryHeap::with_capacity(capacity)),
            Side::Sell => Candidates::Min(BinaryHeap::with_capacity(capacity)),
        }
    }

    #[inline]
    fn push(&mut self, price: Price) {
        match self {
            Candidates::Max(heap) => heap.push(price),
            Candidates::Min(heap) => heap.push(Reverse(price)),
        }
    }

    #[inline]
    fn peek(&self) -> Option<Price> {
        match self {
            Candidates::Max(heap) => heap.peek().copied(),
            Candidates::Min(heap) => heap.peek().map(|entry| entry.0),
        }
    }

    #[inline]
    fn pop(&mut self) {
        match self {
            Candidates::Max(heap) => {
                heap.pop();
            }
            Candidates::Min(heap) => {
                heap.pop();
            }
        }
    }

    fn len(&self) -> usize {
        match self {
            Candidates::Max(heap) => heap.len(),
            Candidates::Min(heap) => heap.len(),
        }
    }

    fn clear(&mut self) {
        match self {
            Candidates::Max(heap) => heap.clear(),
            Candidates::Min(heap) => heap.clear(),
        }
    }
}

/// Side container backed by an ordered map plus a lazily purged price heap
#[derive(Debug)]
pub struct HeapSide {
    side: Side,
    levels: BTreeMap<Price, PriceLevel>,
    candidates: Candidates,
    /// Prices currently in `candidates`
    queued: HashSet<Price>,
    /// Stale heap entries discarded so far
    purged: u64,
}

impl HeapSide {
    /// Number of heap entries, stale ones included
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Total stale heap entries discarded by queries
    pub fn purged_count(&self) -> u64 {
        self.purged
    }
}

impl SideBook for HeapSide {
    const NAME: &'static str = "heap";

    fn new(side: Side, config: &BookConfig) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
            candidates: Candidates::for_side(side, config.expected_levels),
            queued: HashSet::with_capacity(config.expected_levels),
            purged: 0,
        }
    }

    #[inline]
    fn side(&self) -> Side {
        self.side
    }

    fn upsert_level(&mut self, price: Price) -> &mut PriceLevel {
        let side = self.side;
        let level = self.levels.entry(price).or_insert_with(|| {
            trace!(?side, price, "created price level");
            PriceLevel::new(price)
        });

        // About to go live: make sure queries can find it
        if level.is_empty() && self.queued.insert(price) {
            self.candidates.push(price);
        }
        level
    }

    #[inline]
    fn level_at(&self, price: Price) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    #[inline]
    fn level_at_mut(&mut self, price: Price) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&price)
    }

    fn best_level(&mut self) -> Option<PriceLevel> {
        while let Some(price) = self.candidates.peek() {
            match self.levels.get(&price) {
                Some(level) if !level.is_empty() => return Some(*level),
                _ => {
                    self.candidates.pop();
                    self.queued.remove(&price);
                    self.purged += 1;
                    trace!(side = ?self.side, price, "purged stale best-price candidate");
                }
            }
        }

        // Heap drained: the map is ground truth
        self.queued.clear();
        let best = scan_best(&self.levels, self.side);
        if let Some(level) = best {
            self.queued.insert(level.price());
            self.candidates.push(level.price());
        }
        best
    }

    fn depth(&self, limit: usize) -> Vec<PriceLevel> {
        ordered_depth(&self.levels, self.side, limit)
    }

    fn levels(&self) -> Vec<PriceLevel> {
        self.levels.values().copied().collect()
    }

    #[inline]
    fn level_count(&self) -> usize {
        self.levels.len()
    }

    fn compact(&mut self) -> usize {
        // Heap entries for dropped prices go stale and purge on read
        compact_map(&mut self.levels)
    }

    fn clear(&mut self) {
        self.levels.clear();
        self.candidates.clear();
        self.queued.clear();
    }
}
