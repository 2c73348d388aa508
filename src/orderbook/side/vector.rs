//! Flat-vector strategy.
//!
//! Levels sit unordered in a `Vec` and every lookup is a linear scan. With a
//! handful of distinct ticks the whole side fits in a few cache lines, which
//! beats tree traversal; with many ticks it degrades linearly.

use std::cmp::Ordering;

use tracing::trace;

use super::SideBook;
use crate::config::BookConfig;
use crate::orderbook::PriceLevel;
use crate::types::{Price, Side};

/// Side container backed by an unordered vector of levels
#[derive(Debug)]
pub struct VecSide {
    side: Side,
    levels: Vec<PriceLevel>,
}

impl VecSide {
    #[inline]
    fn position(&self, price: Price) -> Option<usize> {
        self.levels.iter().position(|level| level.price() == price)
    }

    /// Best-first ordering for this side
    fn priority(&self, a: &PriceLevel, b: &PriceLevel) -> Ordering {
        match self.side {
            Side::Buy => b.price().cmp(&a.price()),
            Side::Sell => a.price().cmp(&b.price()),
        }
    }
}

impl SideBook for VecSide {
    const NAME: &'static str = "vector";

    fn new(side: Side, config: &BookConfig) -> Self {
        Self {
            side,
            levels: Vec::with_capacity(config.expected_levels),
        }
    }

    #[inline]
    fn side(&self) -> Side {
        self.side
    }

    fn upsert_level(&mut self, price: Price) -> &mut PriceLevel {
        let index = match self.position(price) {
            Some(index) => index,
            None => {
                trace!(side = ?self.side, price, "created price level");
                self.levels.push(PriceLevel::new(price));
                self.levels.len() - 1
            }
        };
        &mut self.levels[index]
    }

    fn level_at(&self, price: Price) -> Option<&PriceLevel> {
        self.levels.iter().find(|level| level.price() == price)
    }

    fn level_at_mut(&mut self, price: Price) -> Option<&mut PriceLevel> {
        self.levels.iter_mut().find(|level| level.price() == price)
    }

    fn best_level(&mut self) -> Option<PriceLevel> {
        let side = self.side;
        self.levels
            .iter()
            .filter(|level| !level.is_empty())
            .fold(None, |best: Option<&PriceLevel>, level| match best {
                Some(incumbent) if !side.is_better(level.price(), incumbent.price()) => best,
                _ => Some(level),
            })
            .copied()
    }

    fn depth(&self, limit: usize) -> Vec<PriceLevel> {
        let mut live: Vec<PriceLevel> = self
            .levels
            .iter()
            .filter(|level| !level.is_empty())
            .copied()
            .collect();
        live.sort_unstable_by(|a, b| self.priority(a, b));
        live.truncate(limit);
        live
    }

    fn levels(&self) -> Vec<PriceLevel> {
        self.levels.clone()
    }

    #[inline]
    fn level_count(&self) -> usize {
        self.levels.len()
    }

    fn compact(&mut self) -> usize {
        let before = self.levels.len();
        self.levels.retain(|level| !level.is_empty());
        before - self.levels.len()
    }

    fn clear(&mut self) {
        self.levels.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_keep_insertion_order() {
        let mut side = VecSide::new(Side::Sell, &BookConfig::default());
        for price in [103, 101, 102] {
            side.upsert_level(price).apply_new_order(1);
        }

        let prices: Vec<Price> = side.levels().iter().map(|l| l.price()).collect();
        assert_eq!(prices, vec![103, 101, 102]);
        assert_eq!(side.best_price(), Some(101));
    }

    #[test]
    fn test_pre_sized_from_config() {
        let side = VecSide::new(Side::Buy, &BookConfig::default().with_expected_levels(64));
        assert!(side.levels.capacity() >= 64);
    }
}
