use std::cmp::Reverse;

use serde::Serialize;

use crate::storage::{GraphStore, Neighbors};
use crate::types::{ChampionId, Result, Weight};

/// A neighbor of the queried champion and the weight of their shared edge.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Partner {
    /// Neighboring champion.
    pub champion: ChampionId,
    /// Number of rosters shared with the queried champion.
    pub weight: Weight,
}

/// Point lookups against one champion.
#[derive(Clone, Copy, Debug)]
pub struct QueryEngine<'a> {
    graph: &'a GraphStore,
}

impl<'a> QueryEngine<'a> {
    /// Engine over `graph`.
    pub fn new(graph: &'a GraphStore) -> Self {
        Self { graph }
    }

    /// Neighbor map of `id`, or `NotFound` when `id` never appeared.
    pub fn query_champion(&self, id: ChampionId) -> Result<&'a Neighbors> {
        self.graph.neighbors(id)
    }

    /// Neighbors of `id` by weight descending, ties by ascending neighbor id.
    pub fn champion_pairs(&self, id: ChampionId) -> Result<Vec<Partner>> {
        let neighbors = self.graph.neighbors(id)?;
        let mut partners: Vec<Partner> = neighbors
            .iter()
            .map(|(&champion, &weight)| Partner { champion, weight })
            .collect();
        partners.sort_by_key(|p| (Reverse(p.weight), p.champion));
        Ok(partners)
    }
}
