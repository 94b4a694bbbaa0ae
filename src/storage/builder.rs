//! Materializes pair counts into a [`GraphStore`].

use std::time::Instant;

use tracing::{debug, info};

use crate::model::MatchRecord;
use crate::storage::aggregate::{aggregate, aggregate_sharded, PairCounts};
use crate::storage::graph::GraphStore;
use crate::types::Result;

/// Options controlling a build pass.
#[derive(Clone, Debug)]
pub struct BuildOptions {
    /// Number of aggregation shards; values above one aggregate on scoped
    /// threads and merge by summation.
    pub shards: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { shards: 1 }
    }
}

impl BuildOptions {
    /// Sets the shard count.
    pub fn shards(mut self, shards: usize) -> Self {
        self.shards = shards;
        self
    }
}

/// Builds graphs from full record sets.
#[derive(Clone, Debug, Default)]
pub struct GraphBuilder {
    opts: BuildOptions,
}

impl GraphBuilder {
    /// Builder with the given options.
    pub fn new(opts: BuildOptions) -> Self {
        Self { opts }
    }

    /// Aggregates `records` and materializes the result.
    pub fn build(&self, records: &[MatchRecord]) -> Result<GraphStore> {
        let started = Instant::now();
        let counts = if self.opts.shards > 1 {
            aggregate_sharded(records, self.opts.shards)
        } else {
            aggregate(records)
        };
        debug!(
            records = counts.records(),
            pairs = counts.len(),
            shards = self.opts.shards,
            "graph.build.aggregated"
        );
        let store = self.materialize(counts)?;
        info!(
            records = store.record_count(),
            nodes = store.node_count(),
            edges = store.edge_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "graph.build.complete"
        );
        Ok(store)
    }

    /// Turns already-aggregated counts into a store. Every champion seen is a
    /// node even if it never formed a pair.
    pub fn materialize(&self, counts: PairCounts) -> Result<GraphStore> {
        let mut store = GraphStore::new();
        store.set_record_count(counts.records());
        for champion in counts.champions() {
            store.add_node(champion);
        }
        for (pair, count) in counts {
            store.insert_edge(pair.low, pair.high, count)?;
        }
        Ok(store)
    }
}

/// Builds a graph with default options.
pub fn build_graph(records: &[MatchRecord]) -> Result<GraphStore> {
    GraphBuilder::default().build(records)
}
