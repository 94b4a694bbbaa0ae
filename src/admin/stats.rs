use serde::Serialize;

use crate::storage::GraphStore;
use crate::types::Weight;

/// Summary figures for a built graph.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    /// Match records the graph was built from.
    pub records: u64,
    /// Distinct champions.
    pub nodes: usize,
    /// Distinct co-occurring pairs.
    pub edges: usize,
    /// Sum of all edge weights.
    pub total_weight: u64,
    /// Heaviest edge weight, zero for an edgeless graph.
    pub max_weight: Weight,
    /// Average number of neighbors per champion.
    pub mean_degree: f64,
    /// `edges / (nodes * (nodes - 1) / 2)`, zero below two nodes.
    pub density: f64,
    /// Champions without any neighbor.
    pub isolated: usize,
}

/// Collects a [`StatsReport`] for `graph`.
pub fn stats(graph: &GraphStore) -> StatsReport {
    let nodes = graph.node_count();
    let edges = graph.edge_count();
    let mut total_weight = 0u64;
    let mut max_weight = 0;
    let mut degree_sum = 0usize;
    let mut isolated = 0usize;

    for (champion, neighbors) in graph.iter() {
        degree_sum += neighbors.len();
        if neighbors.is_empty() {
            isolated += 1;
        }
        for (&other, &weight) in neighbors.range(champion..) {
            if other != champion {
                total_weight += u64::from(weight);
                max_weight = max_weight.max(weight);
            }
        }
    }

    let mean_degree = if nodes == 0 {
        0.0
    } else {
        degree_sum as f64 / nodes as f64
    };
    let density = if nodes < 2 {
        0.0
    } else {
        edges as f64 / (nodes as f64 * (nodes - 1) as f64 / 2.0)
    };

    StatsReport {
        records: graph.record_count(),
        nodes,
        edges,
        total_weight,
        max_weight,
        mean_degree,
        density,
        isolated,
    }
}
