//! Memoized item generators for scripted enemy move patterns.
//!
//! An `ItemSet` follows the same contract as [`Value`](super::Value):
//! `peek` samples once and memoizes, `get` returns the memo and clears it.
//! Enemies use `peek` to show their intention and `get` to act on it.
//!
//! ```
//! use card_battler::core::{GameRng, ItemSet};
//!
//! let mut rng = GameRng::new(0);
//! let mut moves = ItemSet::round_robin(0, vec!["bite", "growl"]);
//!
//! assert_eq!(moves.peek(&mut rng), Some(&"bite"));
//! assert_eq!(moves.get(&mut rng), Some("bite"));
//! assert_eq!(moves.get(&mut rng), Some("growl"));
//! assert_eq!(moves.get(&mut rng), Some("bite"));
//! ```
//!
//! A generator that runs out of items yields `None`. Sequences use that to
//! step from an opening move into a repeating pattern.

use serde::{Deserialize, Serialize};

use super::rng::GameRng;

/// Attempts a repeat filter makes before giving up.
pub const MAX_TRIES: u32 = 100;

/// One step of a [`ItemSource::Sequence`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SequenceEntry<T> {
    /// Yielded once.
    Item(T),
    /// Drawn from until it runs out.
    Set(ItemSet<T>),
}

/// Sampling strategy of an [`ItemSet`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ItemSource<T> {
    RoundRobin {
        items: Vec<T>,
        index: usize,
    },
    Weighted {
        items: Vec<T>,
        weights: Vec<f32>,
    },
    Sequence {
        entries: Vec<SequenceEntry<T>>,
        index: usize,
    },
    /// Rejects `item` once it has been drawn `limit` times
    /// (in a row, when `consecutive`).
    PreventRepeat {
        inner: Box<ItemSet<T>>,
        item: T,
        limit: u32,
        count: u32,
        consecutive: bool,
    },
}

/// A memoized generator of `T`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemSet<T> {
    source: ItemSource<T>,
    memo: Option<T>,
}

impl<T: Clone + PartialEq> ItemSet<T> {
    #[must_use]
    pub fn new(source: ItemSource<T>) -> Self {
        Self { source, memo: None }
    }

    /// Cycle through `items`, starting at `start`.
    #[must_use]
    pub fn round_robin(start: usize, items: Vec<T>) -> Self {
        let index = if items.is_empty() { 0 } else { start % items.len() };
        Self::new(ItemSource::RoundRobin { items, index })
    }

    /// Cycle through `items`, starting at a random position.
    #[must_use]
    pub fn round_robin_random_start(items: Vec<T>, rng: &mut GameRng) -> Self {
        let start = rng.index(items.len()).unwrap_or(0);
        Self::round_robin(start, items)
    }

    /// Draw independently with the given relative weights.
    #[must_use]
    pub fn weighted(items_and_weights: Vec<(T, f32)>) -> Self {
        let (items, weights) = items_and_weights.into_iter().unzip();
        Self::new(ItemSource::Weighted { items, weights })
    }

    /// Walk through `entries` in order.
    #[must_use]
    pub fn sequence(entries: Vec<SequenceEntry<T>>) -> Self {
        Self::new(ItemSource::Sequence { entries, index: 0 })
    }

    /// Wrap this set with one repeat filter per `(item, limit)` pair.
    #[must_use]
    pub fn prevent_repeats(self, rules: Vec<(T, u32)>, consecutive: bool) -> Self {
        rules.into_iter().fold(self, |inner, (item, limit)| {
            Self::new(ItemSource::PreventRepeat {
                inner: Box::new(inner),
                item,
                limit,
                count: 0,
                consecutive,
            })
        })
    }

    /// The memoized item, sampling one first if needed.
    pub fn peek(&mut self, rng: &mut GameRng) -> Option<&T> {
        if self.memo.is_none() {
            self.memo = self.sample(rng);
        }
        self.memo.as_ref()
    }

    /// Return the memoized item (sampling if needed) and clear the memo.
    pub fn get(&mut self, rng: &mut GameRng) -> Option<T> {
        if self.memo.is_none() {
            self.memo = self.sample(rng);
        }
        self.memo.take()
    }

    /// The memoized item without sampling.
    #[must_use]
    pub fn peeked(&self) -> Option<&T> {
        self.memo.as_ref()
    }

    fn sample(&mut self, rng: &mut GameRng) -> Option<T> {
        match &mut self.source {
            ItemSource::RoundRobin { items, index } => {
                let item = items.get(*index)?.clone();
                *index = (*index + 1) % items.len();
                Some(item)
            }
            ItemSource::Weighted { items, weights } => {
                let chosen = rng.choose_weighted(weights)?;
                items.get(chosen).cloned()
            }
            ItemSource::Sequence { entries, index } => {
                while let Some(entry) = entries.get_mut(*index) {
                    match entry {
                        SequenceEntry::Item(item) => {
                            let item = item.clone();
                            *index += 1;
                            return Some(item);
                        }
                        SequenceEntry::Set(set) => match set.get(rng) {
                            Some(item) => return Some(item),
                            None => *index += 1,
                        },
                    }
                }
                None
            }
            ItemSource::PreventRepeat { inner, item, limit, count, consecutive } => {
                for _ in 0..MAX_TRIES {
                    let drawn = inner.get(rng)?;
                    if drawn == *item {
                        *count += 1;
                        if *count >= *limit {
                            continue;
                        }
                    } else if *consecutive {
                        *count = 0;
                    }
                    return Some(drawn);
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_robin_wraps() {
        let mut rng = GameRng::new(0);
        let mut set = ItemSet::round_robin(1, vec![1, 2, 3]);
        let drawn: Vec<_> = (0..5).filter_map(|_| set.get(&mut rng)).collect();
        assert_eq!(drawn, vec![2, 3, 1, 2, 3]);
    }

    #[test]
    fn test_empty_round_robin_is_exhausted() {
        let mut rng = GameRng::new(0);
        let mut set: ItemSet<u8> = ItemSet::round_robin(0, vec![]);
        assert_eq!(set.get(&mut rng), None);
    }

    #[test]
    fn test_peek_memoizes_until_get() {
        let mut rng = GameRng::new(9);
        let mut set = ItemSet::weighted(vec![(1, 1.0), (2, 1.0), (3, 1.0)]);
        let first = *set.peek(&mut rng).unwrap();
        for _ in 0..10 {
            assert_eq!(set.peek(&mut rng), Some(&first));
        }
        assert_eq!(set.get(&mut rng), Some(first));
        assert_eq!(set.peeked(), None);
    }

    #[test]
    fn test_weighted_respects_zero_weights() {
        let mut rng = GameRng::new(3);
        let mut set = ItemSet::weighted(vec![("never", 0.0), ("always", 2.0)]);
        for _ in 0..20 {
            assert_eq!(set.get(&mut rng), Some("always"));
        }
    }

    #[test]
    fn test_sequence_opens_then_loops() {
        let mut rng = GameRng::new(0);
        let mut set = ItemSet::sequence(vec![
            SequenceEntry::Item("open"),
            SequenceEntry::Set(ItemSet::round_robin(0, vec!["a", "b"])),
        ]);
        let drawn: Vec<_> = (0..5).filter_map(|_| set.get(&mut rng)).collect();
        assert_eq!(drawn, vec!["open", "a", "b", "a", "b"]);
    }

    #[test]
    fn test_sequence_skips_exhausted_sets() {
        let mut rng = GameRng::new(0);
        let mut set = ItemSet::sequence(vec![
            SequenceEntry::Set(ItemSet::round_robin(0, vec![])),
            SequenceEntry::Item(7),
        ]);
        assert_eq!(set.get(&mut rng), Some(7));
        assert_eq!(set.get(&mut rng), None);
    }

    #[test]
    fn test_prevent_consecutive_repeats() {
        let mut rng = GameRng::new(0);
        let mut set = ItemSet::round_robin(0, vec!["a", "a", "a", "b"])
            .prevent_repeats(vec![("a", 3)], true);
        let drawn: Vec<_> = (0..4).filter_map(|_| set.get(&mut rng)).collect();
        assert_eq!(drawn, vec!["a", "a", "b", "a"]);
    }

    #[test]
    fn test_prevent_repeats_gives_up_after_max_tries() {
        let mut rng = GameRng::new(0);
        let mut set = ItemSet::round_robin(0, vec![1]).prevent_repeats(vec![(1, 1)], false);
        assert_eq!(set.get(&mut rng), None);
    }

    #[test]
    fn test_random_start_is_seeded() {
        let items = vec![0, 1, 2, 3, 4, 5, 6, 7];
        let mut rng1 = GameRng::new(21);
        let mut rng2 = GameRng::new(21);
        let mut a = ItemSet::round_robin_random_start(items.clone(), &mut rng1);
        let mut b = ItemSet::round_robin_random_start(items, &mut rng2);
        assert_eq!(a.get(&mut rng1), b.get(&mut rng2));
    }
}
