//! Graph storage and construction.
//!
//! Records flow through the pair aggregator into a [`GraphStore`], which the
//! [`GraphBuilder`] materializes once per build. The store is read-only after
//! that and is consumed by the query and analytics layers.

/// Same-roster pair counting.
///
/// Order-independent and shardable: partial counters merge by summation.
pub mod aggregate;

/// Build orchestration from records to a populated store.
pub mod builder;

mod graph;

pub use aggregate::{aggregate, aggregate_sharded, PairCounts, PairKey};
pub use builder::{build_graph, BuildOptions, GraphBuilder};

/// Adjacency storage and the edge type it reports.
pub use graph::{Edge, GraphStore, Neighbors};
