use std::cmp::Reverse;

use serde::Serialize;

use crate::storage::{Edge, GraphStore};
use crate::types::{ChampionId, Result};

/// Number of pairs returned by [`AnalyticsEngine::common_pairs`].
pub const DEFAULT_TOP_PAIRS: usize = 10;

/// Degree centrality of one champion.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Centrality {
    /// Ranked champion.
    pub champion: ChampionId,
    /// Distinct neighbors.
    pub degree: usize,
    /// `degree / (|V| - 1)`, or zero for a single-node graph.
    pub score: f64,
}

/// Whole-graph rankings over a built store.
///
/// Every method is a pure function of the store, so repeated calls return
/// identical results.
#[derive(Clone, Copy, Debug)]
pub struct AnalyticsEngine<'a> {
    graph: &'a GraphStore,
}

impl<'a> AnalyticsEngine<'a> {
    /// Engine over `graph`.
    pub fn new(graph: &'a GraphStore) -> Self {
        Self { graph }
    }

    /// The ten heaviest edges.
    pub fn common_pairs(&self) -> Vec<Edge> {
        self.top_pairs(DEFAULT_TOP_PAIRS)
    }

    /// The `k` heaviest edges, weight descending, ties by ascending `(a, b)`.
    /// Returns every edge when fewer than `k` exist.
    pub fn top_pairs(&self, k: usize) -> Vec<Edge> {
        let mut edges = self.graph.all_edges();
        edges.sort_by_key(|e| (Reverse(e.weight), e.a, e.b));
        edges.truncate(k);
        edges
    }

    /// Champions with no neighbor, ascending.
    pub fn find_isolated_champions(&self) -> Vec<ChampionId> {
        let mut isolated: Vec<ChampionId> = self
            .graph
            .iter()
            .filter(|(_, neighbors)| neighbors.is_empty())
            .map(|(id, _)| id)
            .collect();
        isolated.sort_unstable();
        isolated
    }

    /// Degree centrality for every champion, score descending, ties by
    /// ascending id.
    pub fn most_influential_champions(&self) -> Vec<Centrality> {
        let scale = self.scale();
        let mut ranked: Vec<Centrality> = self
            .graph
            .iter()
            .map(|(champion, neighbors)| Centrality {
                champion,
                degree: neighbors.len(),
                score: neighbors.len() as f64 * scale,
            })
            .collect();
        // Scores share one denominator, so ranking by degree is exact.
        ranked.sort_by_key(|c| (Reverse(c.degree), c.champion));
        ranked
    }

    /// Degree centrality of `id`.
    pub fn degree_centrality(&self, id: ChampionId) -> Result<Centrality> {
        let degree = self.graph.degree(id)?;
        Ok(Centrality {
            champion: id,
            degree,
            score: degree as f64 * self.scale(),
        })
    }

    fn scale(&self) -> f64 {
        match self.graph.node_count() {
            0 | 1 => 0.0,
            n => 1.0 / (n - 1) as f64,
        }
    }
}
