use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;
use tracing::{debug, info};

use crate::model::{MatchRecord, RecordError, ROSTER_SIZE};
use crate::types::ChampionId;

/// Default column prefixes for the two rosters.
pub const DEFAULT_TEAM_PREFIXES: [&str; 2] = ["t1", "t2"];

/// Configuration for loading match records from a CSV file.
#[derive(Debug, Clone)]
pub struct MatchImportConfig {
    /// Path to the CSV file containing one match per row.
    pub path: PathBuf,
    /// Column prefixes of team one and team two. Champion columns are named
    /// `{prefix}_champ{slot}id` with slots 1 through 5.
    pub team_prefixes: [String; 2],
}

impl MatchImportConfig {
    /// Config for `path` with the default `t1`/`t2` prefixes.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            team_prefixes: DEFAULT_TEAM_PREFIXES.map(String::from),
        }
    }

    /// Overrides the roster column prefixes.
    pub fn team_prefixes(mut self, one: impl Into<String>, two: impl Into<String>) -> Self {
        self.team_prefixes = [one.into(), two.into()];
        self
    }

    /// The ten champion column names, team one first, in slot order.
    pub fn columns(&self) -> Vec<String> {
        self.team_prefixes
            .iter()
            .flat_map(|prefix| (1..=ROSTER_SIZE).map(move |slot| column_name(prefix, slot)))
            .collect()
    }
}

/// Records loaded from a CSV file.
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    /// Parsed matches in file order.
    pub matches: Vec<MatchRecord>,
    /// Number of data rows read.
    pub rows: u64,
}

/// Error type for match import.
///
/// Row numbers count data rows from 1, excluding the header.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Generic error message.
    #[error("{0}")]
    Message(String),
    /// The input file could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    Io {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
    /// CSV parsing error.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// A champion column held something other than a non-negative integer.
    #[error("row {row}: column '{column}' has invalid champion id '{value}'")]
    InvalidId {
        /// Data row number.
        row: u64,
        /// Offending column.
        column: String,
        /// Raw cell content.
        value: String,
    },
    /// A champion column was empty or absent from the row.
    #[error("row {row}: missing value for column '{column}'")]
    MissingValue {
        /// Data row number.
        row: u64,
        /// Offending column.
        column: String,
    },
    /// The row parsed but its rosters are invalid.
    #[error("row {row}: {source}")]
    Record {
        /// Data row number.
        row: u64,
        /// Roster violation.
        #[source]
        source: RecordError,
    },
}

/// Loads every match from `cfg.path`.
///
/// The first malformed row aborts the load; no partial record set is returned.
pub fn load_matches(cfg: &MatchImportConfig) -> Result<ImportSummary, ImportError> {
    let file = File::open(&cfg.path).map_err(|source| ImportError::Io {
        path: cfg.path.clone(),
        source,
    })?;
    let summary = read_matches(file, cfg)?;
    info!(
        path = %cfg.path.display(),
        rows = summary.rows,
        "import.matches.complete"
    );
    Ok(summary)
}

/// Parses match rows from any reader using the column layout of `cfg`.
pub fn read_matches<R: Read>(input: R, cfg: &MatchImportConfig) -> Result<ImportSummary, ImportError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(input);
    let headers = reader.headers()?.clone();
    let columns = cfg.columns();
    let indices = columns
        .iter()
        .map(|name| find_column(&headers, name))
        .collect::<Result<Vec<usize>, ImportError>>()?;
    debug!(columns = ?columns, "import.matches.columns");

    let mut summary = ImportSummary::default();
    for result in reader.records() {
        let record = result?;
        let row = summary.rows + 1;
        let mut ids = [ChampionId(0); 2 * ROSTER_SIZE];
        for (slot, (&idx, name)) in indices.iter().zip(&columns).enumerate() {
            ids[slot] = parse_champion(&record, idx, name, row)?;
        }
        let mut team_one = [ChampionId(0); ROSTER_SIZE];
        let mut team_two = [ChampionId(0); ROSTER_SIZE];
        team_one.copy_from_slice(&ids[..ROSTER_SIZE]);
        team_two.copy_from_slice(&ids[ROSTER_SIZE..]);
        let parsed = MatchRecord::new(team_one, team_two)
            .map_err(|source| ImportError::Record { row, source })?;
        summary.matches.push(parsed);
        summary.rows = row;
    }
    Ok(summary)
}

fn column_name(prefix: &str, slot: usize) -> String {
    format!("{prefix}_champ{slot}id")
}

fn find_column(headers: &StringRecord, name: &str) -> Result<usize, ImportError> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| ImportError::Message(format!("column '{}' not found", name)))
}

fn parse_champion(
    record: &StringRecord,
    idx: usize,
    name: &str,
    row: u64,
) -> Result<ChampionId, ImportError> {
    let raw = record
        .get(idx)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ImportError::MissingValue {
            row,
            column: name.to_string(),
        })?;
    raw.parse::<ChampionId>().map_err(|_| ImportError::InvalidId {
        row,
        column: name.to_string(),
        value: raw.to_string(),
    })
}
