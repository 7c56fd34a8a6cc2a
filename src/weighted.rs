//! Weighted random selection of spawn values.
//!
//! Each draw gives every candidate a randomized score of
//! `(weight + 1) + uniform(0..total_weight)` and keeps the highest. Heavier
//! candidates start further ahead, so they win most draws without the set
//! ever normalizing weights into probabilities.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Anything that can take part in a weighted draw.
pub trait Weighted {
    fn weight(&self) -> u32;
}

/// A spawn candidate: a tile value and its positive weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeightedItem {
    pub value: u32,
    pub weight: u32,
}

impl WeightedItem {
    pub const fn new(value: u32, weight: u32) -> Self {
        WeightedItem { value, weight }
    }
}

/// Classic spawn table: mostly 2s, the odd 4.
pub const DEFAULT_WEIGHTS: [WeightedItem; 2] = [WeightedItem::new(2, 98), WeightedItem::new(4, 2)];

impl Weighted for WeightedItem {
    #[inline]
    fn weight(&self) -> u32 { self.weight }
}

impl fmt::Display for WeightedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.value, self.weight)
    }
}

/// Parses `VALUE:WEIGHT`, e.g. `2:98`.
impl FromStr for WeightedItem {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (value, weight) = s
            .split_once(':')
            .ok_or_else(|| GameError::InvalidArgument(format!("expected VALUE:WEIGHT, got {s:?}")))?;
        let value = value
            .trim()
            .parse::<u32>()
            .map_err(|e| GameError::InvalidArgument(format!("bad tile value {value:?}: {e}")))?;
        let weight = weight
            .trim()
            .parse::<u32>()
            .map_err(|e| GameError::InvalidArgument(format!("bad weight {weight:?}: {e}")))?;
        if weight == 0 {
            return Err(GameError::InvalidArgument(format!("weight for tile {value} must be positive")));
        }
        Ok(WeightedItem { value, weight })
    }
}

/// Candidates kept sorted ascending by weight, unique by equality.
#[derive(Debug, Clone)]
pub struct WeightedRandomSet<T> {
    items: Vec<T>,
    total_weight: u64,
}

impl<T> Default for WeightedRandomSet<T> {
    fn default() -> Self {
        WeightedRandomSet { items: Vec::new(), total_weight: 0 }
    }
}

impl<T: Weighted + PartialEq> WeightedRandomSet<T> {
    pub fn new() -> Self { Self::default() }

    /// Build a set from `items`, failing on the first non-positive weight.
    pub fn from_items<I: IntoIterator<Item = T>>(items: I) -> Result<Self, GameError> {
        let mut set = Self::new();
        set.add_items(items)?;
        Ok(set)
    }

    #[inline]
    pub fn items(&self) -> &[T] { &self.items }

    #[inline]
    pub fn len(&self) -> usize { self.items.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    #[inline]
    pub fn total_weight(&self) -> u64 { self.total_weight }

    /// Insert `item` before the first candidate of equal or greater weight.
    ///
    /// Returns `Ok(false)` when an equal item is already present.
    pub fn add_item(&mut self, item: T) -> Result<bool, GameError> {
        let weight = item.weight();
        if weight == 0 {
            return Err(GameError::InvalidArgument("weighted item must have a positive weight".into()));
        }
        if self.items.contains(&item) {
            return Ok(false);
        }
        let index = self
            .items
            .iter()
            .position(|it| it.weight() >= weight)
            .unwrap_or(self.items.len());
        self.items.insert(index, item);
        self.total_weight += u64::from(weight);
        Ok(true)
    }

    pub fn add_items<I: IntoIterator<Item = T>>(&mut self, items: I) -> Result<(), GameError> {
        for item in items {
            self.add_item(item)?;
        }
        Ok(())
    }

    /// Remove `item` if present, returning whether it was.
    pub fn remove_item(&mut self, item: &T) -> bool {
        match self.items.iter().position(|it| it == item) {
            Some(index) => {
                let removed = self.items.remove(index);
                self.total_weight -= u64::from(removed.weight());
                true
            }
            None => false,
        }
    }

    // Zero total means an empty set; keep the range non-empty anyway.
    #[inline]
    fn draw_bound(&self) -> u64 { self.total_weight.max(1) }

    #[inline]
    fn draw<R: Rng + ?Sized>(item: &T, bound: u64, rng: &mut R) -> u64 {
        u64::from(item.weight()) + 1 + rng.gen_range(0..bound)
    }

    /// Index of the highest randomized score; the first candidate wins ties.
    fn best_index<R: Rng + ?Sized>(&self, bound: u64, rng: &mut R) -> Option<usize> {
        let mut best: Option<(usize, u64)> = None;
        for (i, item) in self.items.iter().enumerate() {
            let score = Self::draw(item, bound, rng);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((i, score));
            }
        }
        best.map(|(i, _)| i)
    }

    /// One randomized pass, highest score first. Ties keep insertion order.
    fn ranked<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<(usize, u64)> {
        let bound = self.draw_bound();
        let mut scored: Vec<(usize, u64)> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| (i, Self::draw(item, bound, rng)))
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored
    }

    /// Pick one candidate, or `None` on an empty set.
    ///
    /// ```
    /// use slide_2048::weighted::{WeightedItem, WeightedRandomSet};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let set = WeightedRandomSet::from_items([WeightedItem::new(2, 1)]).unwrap();
    /// let mut rng = StdRng::seed_from_u64(7);
    /// assert_eq!(set.select(&mut rng).map(|it| it.value), Some(2));
    /// ```
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        self.best_index(self.draw_bound(), rng).map(|i| &self.items[i])
    }

    /// Pick the candidate with the lowest randomized score.
    pub fn select_last<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        self.ranked(rng).last().map(|&(i, _)| &self.items[i])
    }

    /// Up to `count` candidates from a single randomized pass, best first.
    pub fn select_many<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<&T> {
        self.ranked(rng)
            .into_iter()
            .take(count)
            .map(|(i, _)| &self.items[i])
            .collect()
    }

    /// Run `draws` selections and count how often each candidate won.
    ///
    /// Counts line up with [`items`](Self::items).
    pub fn sample_counts<R: Rng + ?Sized>(&self, rng: &mut R, draws: usize) -> Vec<usize> {
        let mut counts = vec![0usize; self.items.len()];
        let bound = self.draw_bound();
        for _ in 0..draws {
            if let Some(i) = self.best_index(bound, rng) {
                counts[i] += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn default_set() -> WeightedRandomSet<WeightedItem> {
        WeightedRandomSet::from_items(DEFAULT_WEIGHTS).unwrap()
    }

    #[test]
    fn single_item_always_selected() {
        let set = WeightedRandomSet::from_items([WeightedItem::new(2, 1)]).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            assert_eq!(set.select(&mut rng).unwrap().value, 2);
        }
    }

    #[test]
    fn empty_set_selects_nothing() {
        let set: WeightedRandomSet<WeightedItem> = WeightedRandomSet::new();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(set.select(&mut rng).is_none());
        assert!(set.select_last(&mut rng).is_none());
        assert!(set.select_many(&mut rng, 3).is_empty());
        assert_eq!(set.total_weight(), 0);
    }

    #[test]
    fn zero_weight_rejected() {
        let mut set = WeightedRandomSet::new();
        let err = set.add_item(WeightedItem::new(8, 0)).unwrap_err();
        assert!(matches!(err, GameError::InvalidArgument(_)));
        assert!(set.is_empty());
        assert!(WeightedRandomSet::from_items([WeightedItem::new(2, 5), WeightedItem::new(4, 0)]).is_err());
    }

    #[test]
    fn items_sorted_ascending_and_unique() {
        let mut set = WeightedRandomSet::new();
        assert!(set.add_item(WeightedItem::new(2, 98)).unwrap());
        assert!(set.add_item(WeightedItem::new(4, 2)).unwrap());
        assert!(set.add_item(WeightedItem::new(8, 50)).unwrap());
        assert!(!set.add_item(WeightedItem::new(4, 2)).unwrap());
        let weights: Vec<u32> = set.items().iter().map(|it| it.weight).collect();
        assert_eq!(weights, vec![2, 50, 98]);
        assert_eq!(set.total_weight(), 150);
    }

    #[test]
    fn remove_item_adjusts_total() {
        let mut set = default_set();
        assert!(set.remove_item(&WeightedItem::new(4, 2)));
        assert!(!set.remove_item(&WeightedItem::new(4, 2)));
        assert_eq!(set.total_weight(), 98);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn default_weights_frequency() {
        let set = default_set();
        let mut rng = StdRng::seed_from_u64(2048);
        let draws = 10_000;
        let counts = set.sample_counts(&mut rng, draws);
        let twos = set
            .items()
            .iter()
            .zip(&counts)
            .find(|(it, _)| it.value == 2)
            .map(|(_, &c)| c)
            .unwrap();
        let freq = twos as f64 / draws as f64;
        assert!((freq - 0.98).abs() <= 0.03, "frequency of 2 was {freq}");
        assert_eq!(counts.iter().sum::<usize>(), draws);
    }

    #[test]
    fn select_many_is_ranked_and_bounded() {
        let set = WeightedRandomSet::from_items([
            WeightedItem::new(2, 1000),
            WeightedItem::new(4, 1),
            WeightedItem::new(8, 1),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let picked = set.select_many(&mut rng, 2);
        assert_eq!(picked.len(), 2);
        assert_eq!(picked[0].value, 2);
        assert_eq!(set.select_many(&mut rng, 10).len(), 3);
        assert_ne!(set.select_last(&mut rng).unwrap().value, 2);
    }

    #[test]
    fn sample_counts_replays_select() {
        let set = WeightedRandomSet::from_items([
            WeightedItem::new(2, 5),
            WeightedItem::new(4, 3),
            WeightedItem::new(8, 2),
        ])
        .unwrap();
        let mut a = StdRng::seed_from_u64(77);
        let mut b = StdRng::seed_from_u64(77);
        let mut expected = vec![0usize; set.len()];
        for _ in 0..500 {
            let pick = set.select(&mut a).unwrap();
            let i = set.items().iter().position(|it| it == pick).unwrap();
            expected[i] += 1;
        }
        assert_eq!(set.sample_counts(&mut b, 500), expected);
    }

    #[test]
    fn parse_weight_spec() {
        assert_eq!("2:98".parse::<WeightedItem>().unwrap(), WeightedItem::new(2, 98));
        assert_eq!(" 4 : 2 ".parse::<WeightedItem>().unwrap(), WeightedItem::new(4, 2));
        assert!("4".parse::<WeightedItem>().is_err());
        assert!("4:0".parse::<WeightedItem>().is_err());
        assert!("x:1".parse::<WeightedItem>().is_err());
        assert_eq!(WeightedItem::new(2, 98).to_string(), "2:98");
    }
}
