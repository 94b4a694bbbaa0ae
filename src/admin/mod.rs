#![forbid(unsafe_code)]

//! Reporting utilities over a built graph.
//!
//! This module provides summary statistics and an invariant checker, used by
//! the CLI `stats` and `verify` commands and by tests.

mod stats;
mod verify;

/// Summary statistics for a built graph.
///
/// Counts nodes, edges and weights, and derives mean degree and density.
pub use stats::{stats, StatsReport};

/// Graph integrity verification.
///
/// Checks symmetry, self-loops, weights and, optionally, count conservation
/// against the aggregated pair counts.
pub use verify::{verify, VerifyCounts, VerifyFinding, VerifyReport, VerifySeverity};
