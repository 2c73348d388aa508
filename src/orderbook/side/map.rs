//! Sorted-map strategy.
//!
//! Levels are kept in a `BTreeMap` keyed by price. The best bid is found by
//! walking from the high end, the best ask from the low end, skipping levels
//! whose last order has left.

use std::collections::BTreeMap;

use tracing::trace;

use super::SideBook;
use crate::config::BookConfig;
use crate::orderbook::PriceLevel;
use crate::types::{Price, Side};

/// Side container backed by an ordered map of levels
#[derive(Debug)]
pub struct MapSide {
    side: Side,
    levels: BTreeMap<Price, PriceLevel>,
}

impl SideBook for MapSide {
    const NAME: &'static str = "map";

    fn new(side: Side, _config: &BookConfig) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
        }
    }

    #[inline]
    fn side(&self) -> Side {
        self.side
    }

    fn upsert_level(&mut self, price: Price) -> &mut PriceLevel {
        let side = self.side;
        self.levels.entry(price).or_insert_with(|| {
            trace!(?side, price, "created price level");
            PriceLevel::new(price)
        })
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
        scan_best(&self.levels, self.side)
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
        compact_map(&mut self.levels)
    }

    fn clear(&mut self) {
        self.levels.clear();
    }
}

// ============================================================================
// Ordered-map helpers (shared with the heap-assisted strategy)
// ============================================================================

/// Walk from the best end of `levels` to the first non-empty level
pub(super) fn scan_best(levels: &BTreeMap<Price, PriceLevel>, side: Side) -> Option<PriceLevel> {
    match side {
        Side::Buy => levels.values().rev().find(|level| !level.is_empty()).copied(),
        Side::Sell => levels.values().find(|level| !level.is_empty()).copied(),
    }
}

/// Up to `limit` non-empty levels of `levels`, best first
pub(super) fn ordered_depth(
    levels: &BTreeMap<Price, PriceLevel>,
    side: Side,
    limit: usize,
) -> Vec<PriceLevel> {
    let live = |level: &&PriceLevel| !level.is_empty();
    match side {
        Side::Buy => levels.values().rev().filter(live).take(limit).copied().collect(),
        Side::Sell => levels.values().filter(live).take(limit).copied().collect(),
    }
}

/// Remove empty levels, returning how many were dropped
pub(super) fn compact_map(levels: &mut BTreeMap<Price, PriceLevel>) -> usize {
    let before = levels.len();
    levels.retain(|_, level| !level.is_empty());
    before - levels.len()
}
