//! Adjacency-map storage for the champion graph.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::types::{ChampionId, GraphError, Result, Weight};

/// Neighbors of one champion, keyed by neighbor id.
pub type Neighbors = BTreeMap<ChampionId, Weight>;

/// One undirected weighted edge, reported with `a < b`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct Edge {
    /// Smaller endpoint.
    pub a: ChampionId,
    /// Larger endpoint.
    pub b: ChampionId,
    /// Number of rosters the pair shared.
    pub weight: Weight,
}

/// Weighted undirected graph over champions.
///
/// Every edge is stored twice, once under each endpoint, with the same weight.
/// Mutation is crate-private: a store handed out by the builder is frozen and
/// may be shared across threads without locking.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphStore {
    adjacency: FxHashMap<ChampionId, Neighbors>,
    edge_count: usize,
    record_count: u64,
}

impl GraphStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_record_count(&mut self, records: u64) {
        self.record_count = records;
    }

    /// Registers `id` with no neighbors if it is not present yet.
    pub(crate) fn add_node(&mut self, id: ChampionId) {
        self.adjacency.entry(id).or_default();
    }

    /// Writes `a -- b` with `weight` under both endpoints. Re-inserting an
    /// existing edge overwrites its weight.
    pub(crate) fn insert_edge(&mut self, a: ChampionId, b: ChampionId, weight: Weight) -> Result<()> {
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }
        let previous = self.adjacency.entry(a).or_default().insert(b, weight);
        self.adjacency.entry(b).or_default().insert(a, weight);
        if previous.is_none() {
            self.edge_count += 1;
        }
        Ok(())
    }

    /// Neighbor map of `id`.
    pub fn neighbors(&self, id: ChampionId) -> Result<&Neighbors> {
        self.adjacency.get(&id).ok_or(GraphError::NotFound(id))
    }

    /// True if `id` appeared in any roster of the build input.
    pub fn has_node(&self, id: ChampionId) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Number of distinct neighbors of `id`.
    pub fn degree(&self, id: ChampionId) -> Result<usize> {
        self.neighbors(id).map(BTreeMap::len)
    }

    /// Weight of `a -- b`, or `None` when the pair never co-occurred.
    pub fn weight(&self, a: ChampionId, b: ChampionId) -> Option<Weight> {
        self.adjacency.get(&a).and_then(|n| n.get(&b)).copied()
    }

    /// Every edge exactly once, sorted by `(a, b)`.
    pub fn all_edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .adjacency
            .iter()
            .flat_map(|(&a, neighbors)| {
                neighbors
                    .range(a..)
                    .filter(move |(b, _)| **b != a)
                    .map(move |(&b, &weight)| Edge { a, b, weight })
            })
            .collect();
        edges.sort_unstable_by_key(|edge| (edge.a, edge.b));
        edges
    }

    /// All champions in ascending order.
    pub fn nodes(&self) -> Vec<ChampionId> {
        let mut nodes: Vec<ChampionId> = self.adjacency.keys().copied().collect();
        nodes.sort_unstable();
        nodes
    }

    /// Unordered iteration over `(champion, neighbors)`.
    pub fn iter(&self) -> impl Iterator<Item = (ChampionId, &Neighbors)> + '_ {
        self.adjacency.iter().map(|(id, neighbors)| (*id, neighbors))
    }

    /// Number of champions.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of match records the store was built from.
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// True when the store holds no champion.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}
