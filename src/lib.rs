//! Champion co-occurrence graph.
//!
//! Match records pass through a pair aggregator into an immutable weighted
//! graph, which the query and analytics engines read.
//!
//! ```
//! use champnet::model::MatchRecord;
//! use champnet::query::{AnalyticsEngine, QueryEngine};
//! use champnet::storage::build_graph;
//! use champnet::types::ChampionId;
//!
//! let records = [MatchRecord::from_ids([1, 2, 3, 4, 5], [6, 7, 8, 9, 10])?];
//! let graph = build_graph(&records)?;
//! assert_eq!(graph.weight(ChampionId(1), ChampionId(2)), Some(1));
//! assert_eq!(QueryEngine::new(&graph).champion_pairs(ChampionId(1))?.len(), 4);
//! assert_eq!(AnalyticsEngine::new(&graph).common_pairs().len(), 10);
//! # Ok::<(), champnet::types::GraphError>(())
//! ```

#![warn(missing_docs)]

pub mod admin;
pub mod cli;
pub mod logging;
pub mod model;
pub mod query;
pub mod storage;
pub mod types;
