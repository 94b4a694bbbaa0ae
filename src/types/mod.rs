#![forbid(unsafe_code)]

//! Identifier newtypes and the crate-wide error type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::RecordError;

/// Identifier of a champion; every distinct id is one node of the graph.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ChampionId(pub u64);

/// Co-occurrence count carried by an edge.
pub type Weight = u32;

/// Errors raised by graph construction and lookups.
#[derive(thiserror::Error, Debug)]
pub enum GraphError {
    /// The champion never appeared in any roster of the build input.
    #[error("champion {0} not found")]
    NotFound(ChampionId),
    /// An edge from a champion to itself was requested.
    #[error("self-loop on champion {0} is not allowed")]
    SelfLoop(ChampionId),
    /// A match record violated a roster invariant.
    #[error(transparent)]
    Record(#[from] RecordError),
    /// Caller supplied an argument that cannot be honored.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

impl GraphError {
    /// Returns true for the `NotFound` variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GraphError::NotFound(_))
    }
}

impl fmt::Display for ChampionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ChampionId {
    fn from(value: u64) -> Self {
        ChampionId(value)
    }
}

impl From<ChampionId> for u64 {
    fn from(value: ChampionId) -> Self {
        value.0
    }
}

impl FromStr for ChampionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(ChampionId)
    }
}
