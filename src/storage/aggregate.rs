//! Pair aggregation: counts how often two champions share a roster.

use std::collections::hash_map;
use std::thread;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use tracing::debug;

use crate::model::MatchRecord;
use crate::types::{ChampionId, Weight};

/// Unordered champion pair, normalized so that `low <= high`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub struct PairKey {
    /// Smaller id of the pair.
    pub low: ChampionId,
    /// Larger id of the pair.
    pub high: ChampionId,
}

impl PairKey {
    /// Normalizes `(a, b)` into `(min, max)`.
    pub fn new(a: ChampionId, b: ChampionId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }
}

/// Accumulated pair counts plus the champions and records that produced them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PairCounts {
    counts: FxHashMap<PairKey, Weight>,
    champions: FxHashSet<ChampionId>,
    records: u64,
}

impl PairCounts {
    /// Empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the 20 roster pairs of `record`.
    pub fn observe(&mut self, record: &MatchRecord) {
        for roster in record.rosters() {
            self.champions.extend(roster.members().iter().copied());
            for (a, b) in roster.pairs() {
                *self.counts.entry(PairKey::new(a, b)).or_insert(0) += 1;
            }
        }
        self.records += 1;
    }

    /// Folds `other` into `self` by summation.
    pub fn merge(&mut self, other: PairCounts) {
        for (key, count) in other.counts {
            *self.counts.entry(key).or_insert(0) += count;
        }
        self.champions.extend(other.champions);
        self.records += other.records;
    }

    /// Count for the unordered pair `(a, b)`; zero when never observed.
    pub fn get(&self, a: ChampionId, b: ChampionId) -> Weight {
        self.counts.get(&PairKey::new(a, b)).copied().unwrap_or(0)
    }

    /// Number of distinct pairs observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no pair has been observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of records observed.
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Champions seen in any roster.
    pub fn champions(&self) -> impl Iterator<Item = ChampionId> + '_ {
        self.champions.iter().copied()
    }

    /// Unordered iteration over `(pair, count)`.
    pub fn iter(&self) -> impl Iterator<Item = (PairKey, Weight)> + '_ {
        self.counts.iter().map(|(key, count)| (*key, *count))
    }
}

impl IntoIterator for PairCounts {
    type Item = (PairKey, Weight);
    type IntoIter = hash_map::IntoIter<PairKey, Weight>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

impl<'a> Extend<&'a MatchRecord> for PairCounts {
    fn extend<I: IntoIterator<Item = &'a MatchRecord>>(&mut self, records: I) {
        for record in records {
            self.observe(record);
        }
    }
}

/// Counts every same-roster pair across `records`.
pub fn aggregate<'a, I>(records: I) -> PairCounts
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let mut counts = PairCounts::new();
    counts.extend(records);
    counts
}

/// Aggregates contiguous chunks of `records` on scoped threads and merges the
/// partial counters. Produces the same counts as [`aggregate`].
pub fn aggregate_sharded(records: &[MatchRecord], shards: usize) -> PairCounts {
    let shards = shards.max(1);
    if shards == 1 || records.len() < shards {
        return aggregate(records);
    }
    let chunk_len = records.len().div_ceil(shards);
    debug!(shards, chunk_len, records = records.len(), "aggregate.sharded.start");

    thread::scope(|scope| {
        let handles: Vec<_> = records
            .chunks(chunk_len)
            .map(|chunk| scope.spawn(move || aggregate(chunk)))
            .collect();
        let mut total = PairCounts::new();
        for handle in handles {
            match handle.join() {
                Ok(partial) => total.merge(partial),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        total
    })
}
