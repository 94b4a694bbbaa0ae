#![forbid(unsafe_code)]

//! Command-line support: loading match records from CSV input.
//!
//! This is the boundary with raw tabular data. Everything past it works on
//! validated [`MatchRecord`](crate::model::MatchRecord)s.

/// CSV match import.
///
/// Reads the ten `{team}_champ{slot}id` columns of each row and rejects the
/// whole load on the first malformed row.
pub mod import;
