#![forbid(unsafe_code)]

//! Read-only consumers of a built [`GraphStore`](crate::storage::GraphStore).
//!
//! Point lookups live in [`lookup`], whole-graph rankings in [`analytics`].
//! Both borrow the store and never mutate it, so any number of engines may run
//! against the same store concurrently.

/// Whole-graph analytics: heaviest pairs, isolated champions, centrality.
pub mod analytics;

/// Per-champion neighbor lookups.
pub mod lookup;

pub use analytics::{AnalyticsEngine, Centrality, DEFAULT_TOP_PAIRS};
pub use lookup::{Partner, QueryEngine};
