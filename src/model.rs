//! Match records: two rosters of five champions each.
//!
//! Rosters are validated on construction, so every record that reaches the
//! aggregator is well formed.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::types::ChampionId;

/// Number of champions on one roster.
pub const ROSTER_SIZE: usize = 5;

/// Number of unordered pairs a single roster contributes.
pub const PAIRS_PER_ROSTER: usize = ROSTER_SIZE * (ROSTER_SIZE - 1) / 2;

/// Which of the two rosters of a match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    /// First roster (`t1` columns).
    One,
    /// Second roster (`t2` columns).
    Two,
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::One => write!(f, "team 1"),
            Team::Two => write!(f, "team 2"),
        }
    }
}

/// Rejected record shapes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// A roster listed the same champion in two slots.
    #[error("{team} lists champion {champion} more than once")]
    DuplicateChampion {
        /// Roster holding the repeat.
        team: Team,
        /// Repeated champion.
        champion: ChampionId,
    },
}

/// Five distinct champions in slot order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct Roster([ChampionId; ROSTER_SIZE]);

impl Roster {
    fn validate(members: [ChampionId; ROSTER_SIZE], team: Team) -> Result<Self, RecordError> {
        for (i, champion) in members.iter().enumerate() {
            if members[i + 1..].contains(champion) {
                return Err(RecordError::DuplicateChampion {
                    team,
                    champion: *champion,
                });
            }
        }
        Ok(Roster(members))
    }

    /// Champions in slot order.
    pub fn members(&self) -> &[ChampionId; ROSTER_SIZE] {
        &self.0
    }

    /// Every unordered slot pair `(i, j)` with `i < j`, yielding the champions
    /// in slot order. Always yields `PAIRS_PER_ROSTER` items.
    pub fn pairs(&self) -> impl Iterator<Item = (ChampionId, ChampionId)> + '_ {
        (0..ROSTER_SIZE).flat_map(move |i| {
            (i + 1..ROSTER_SIZE).map(move |j| (self.0[i], self.0[j]))
        })
    }
}

/// One match. Immutable once constructed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct MatchRecord {
    team_one: Roster,
    team_two: Roster,
}

impl MatchRecord {
    /// Builds a record, rejecting any roster that repeats a champion.
    ///
    /// The same champion may appear on both rosters: pairs are only formed
    /// within a roster.
    pub fn new(
        team_one: [ChampionId; ROSTER_SIZE],
        team_two: [ChampionId; ROSTER_SIZE],
    ) -> Result<Self, RecordError> {
        Ok(Self {
            team_one: Roster::validate(team_one, Team::One)?,
            team_two: Roster::validate(team_two, Team::Two)?,
        })
    }

    /// Convenience constructor from raw integer ids.
    pub fn from_ids(
        team_one: [u64; ROSTER_SIZE],
        team_two: [u64; ROSTER_SIZE],
    ) -> Result<Self, RecordError> {
        Self::new(team_one.map(ChampionId), team_two.map(ChampionId))
    }

    /// Roster for `team`.
    pub fn roster(&self, team: Team) -> &Roster {
        match team {
            Team::One => &self.team_one,
            Team::Two => &self.team_two,
        }
    }

    /// Both rosters, team one first.
    pub fn rosters(&self) -> [&Roster; 2] {
        [&self.team_one, &self.team_two]
    }

    /// All ten champion slots, team one first.
    pub fn champions(&self) -> impl Iterator<Item = ChampionId> + '_ {
        self.rosters()
            .into_iter()
            .flat_map(|roster| roster.members().iter().copied())
    }
}
