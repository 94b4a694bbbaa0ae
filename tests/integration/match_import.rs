#![allow(missing_docs)]

use std::fs;

use champnet::{
    cli::import::{load_matches, ImportError, MatchImportConfig},
    model::{RecordError, Team},
    storage::build_graph,
    types::ChampionId,
};
use tempfile::TempDir;

const HEADER: &str = "gameid,creationTime,winner,\
t1_champ1id,t1_champ2id,t1_champ3id,t1_champ4id,t1_champ5id,\
t2_champ1id,t2_champ2id,t2_champ3id,t2_champ4id,t2_champ5id";

fn write_csv(dir: &TempDir, rows: &[&str]) -> std::path::PathBuf {
    let path = dir.path().join("games.csv");
    let mut body = String::from(HEADER);
    for row in rows {
        body.push('\n');
        body.push_str(row);
    }
    body.push('\n');
    fs::write(&path, body).expect("write csv");
    path
}

#[test]
fn loads_file_into_a_buildable_record_set() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_csv(
        &dir,
        &[
            "1,1504279457970,1,8,432,96,11,112,104,498,122,238,412",
            "2,1497848803862,2,119,39,76,10,35,54,25,120,157,92",
            "3,1504018544780,1,8,76,96,11,37,104,25,122,238,412",
        ],
    );

    let summary = load_matches(&MatchImportConfig::new(&path)).expect("load");
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.matches.len(), 3);
    assert_eq!(
        summary.matches[0].roster(Team::Two).members()[0],
        ChampionId(104)
    );

    let graph = build_graph(&summary.matches).expect("build");
    assert_eq!(graph.record_count(), 3);
    assert_eq!(graph.weight(ChampionId(8), ChampionId(96)), Some(2));
    assert_eq!(graph.weight(ChampionId(104), ChampionId(412)), Some(2));
    assert_eq!(graph.weight(ChampionId(8), ChampionId(104)), None);
}

#[test]
fn missing_file_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let err = load_matches(&MatchImportConfig::new(dir.path().join("absent.csv"))).unwrap_err();
    assert!(err.to_string().contains("absent.csv"));
    match &err {
        ImportError::Io { path, source } => {
            assert!(path.ends_with("absent.csv"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn duplicate_champion_aborts_the_load() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_csv(
        &dir,
        &[
            "1,0,1,1,2,3,4,5,6,7,8,9,10",
            "2,0,1,1,2,3,4,5,6,7,8,9,6",
        ],
    );

    let err = load_matches(&MatchImportConfig::new(&path)).unwrap_err();
    match err {
        ImportError::Record { row, source } => {
            assert_eq!(row, 2);
            assert_eq!(
                source,
                RecordError::DuplicateChampion {
                    team: Team::Two,
                    champion: ChampionId(6),
                }
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_numeric_id_names_the_column() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_csv(&dir, &["1,0,1,1,2,three,4,5,6,7,8,9,10"]);

    let err = load_matches(&MatchImportConfig::new(&path)).unwrap_err();
    assert!(matches!(
        err,
        ImportError::InvalidId { row: 1, ref column, ref value }
            if column == "t1_champ3id" && value == "three"
    ));
}
