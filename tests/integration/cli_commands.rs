#![allow(missing_docs)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

const MATCHES_CSV: &str = "\
gameid,t1_champ1id,t1_champ2id,t1_champ3id,t1_champ4id,t1_champ5id,t2_champ1id,t2_champ2id,t2_champ3id,t2_champ4id,t2_champ5id
3326086514,1,2,3,4,5,6,7,8,9,10
3229566029,1,2,3,4,5,11,12,13,14,15
3327363504,2,16,17,18,19,6,7,20,21,22
";

struct Fixture {
    dir: TempDir,
    matches: PathBuf,
    config: PathBuf,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().expect("tempdir");
    let matches = dir.path().join("games.csv");
    fs::write(&matches, MATCHES_CSV).expect("write matches");
    let config = dir.path().join("config.toml");
    Fixture {
        dir,
        matches,
        config,
    }
}

impl Fixture {
    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("champnet");
        cmd.env_remove("CHAMPNET_MATCHES")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(&self.config)
            .arg("--matches")
            .arg(&self.matches);
        cmd
    }

    fn json(&self, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .args(["--format", "json"])
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&output).expect("valid json")
    }
}

#[test]
fn stats_emits_json() {
    let fx = fixture();
    let json = fx.json(&["stats"]);
    assert_eq!(json["records"], 3);
    assert_eq!(json["nodes"], 22);
    assert_eq!(json["total_weight"], 60);
    assert_eq!(json["isolated"], 0);
    assert!(json["density"].is_number());
}

#[test]
fn pairs_lists_heaviest_partner_first() {
    let fx = fixture();
    let json = fx.json(&["pairs", "1", "--limit", "2"]);
    let partners = json.as_array().expect("array");
    assert_eq!(partners.len(), 2);
    assert_eq!(partners[0]["champion"], 2);
    assert_eq!(partners[0]["weight"], 2);
    assert_eq!(partners[1]["champion"], 3);
}

#[test]
fn query_reports_degree_and_neighbors() {
    let fx = fixture();
    let json = fx.json(&["query", "6"]);
    assert_eq!(json["champion"], 6);
    assert_eq!(json["degree"], 7);
    assert_eq!(json["neighbors"][0]["champion"], 7);
    assert_eq!(json["neighbors"][0]["weight"], 2);
}

#[test]
fn common_honors_top_flag() {
    let fx = fixture();
    let json = fx.json(&["common", "--top", "3"]);
    let edges = json.as_array().expect("array");
    assert_eq!(edges.len(), 3);
    assert_eq!((edges[0]["a"].as_u64(), edges[0]["b"].as_u64()), (Some(1), Some(2)));
    assert_eq!(edges[0]["weight"], 2);
}

#[test]
fn influential_respects_limit() {
    let fx = fixture();
    let json = fx.json(&["influential", "--limit", "1"]);
    let ranking = json.as_array().expect("array");
    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0]["champion"], 2);
    assert_eq!(ranking[0]["degree"], 8);
}

#[test]
fn edges_and_isolated_cover_the_graph() {
    let fx = fixture();
    assert_eq!(fx.json(&["edges"]).as_array().map(Vec::len), Some(49));
    assert_eq!(fx.json(&["isolated"]).as_array().map(Vec::len), Some(0));
}

#[test]
fn verify_succeeds_with_sharding() {
    let fx = fixture();
    let json = fx.json(&["--shards", "2", "verify"]);
    assert_eq!(json["success"], true);
    assert!(json["counts"]["pairs_compared"].as_u64().unwrap_or(0) > 0);
}

#[test]
fn verify_exit_status_reflects_the_report() {
    let fx = fixture();
    let output = fx
        .cmd()
        .args(["--theme", "plain", "verify"])
        .assert()
        .code(0)
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).expect("utf8");
    assert!(text.contains("graph is consistent"), "stdout: {text}");
}

#[test]
fn text_output_renders_table() {
    let fx = fixture();
    let output = fx
        .cmd()
        .args(["--theme", "plain", "pairs", "2"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).expect("utf8");
    assert!(text.contains("Partners of 2"));
    assert!(text.contains("champion"));
}

#[test]
fn unknown_champion_exits_with_error() {
    let fx = fixture();
    let output = fx
        .cmd()
        .args(["query", "999"])
        .assert()
        .code(1)
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).expect("utf8");
    assert!(stderr.contains("champion 999 not found"), "stderr: {stderr}");
}

#[test]
fn malformed_row_fails_the_load() {
    let fx = fixture();
    fs::write(
        &fx.matches,
        format!("{MATCHES_CSV}9,1,1,3,4,5,6,7,8,9,10\n"),
    )
    .expect("write matches");
    let output = fx
        .cmd()
        .arg("stats")
        .assert()
        .code(1)
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).expect("utf8");
    assert!(stderr.contains("row 4"), "stderr: {stderr}");
}

#[test]
fn config_file_supplies_matches_and_defaults() {
    let fx = fixture();
    fs::write(
        &fx.config,
        format!(
            "[input]\nmatches = {:?}\n[analytics]\ntop_pairs = 2\n",
            fx.matches.display().to_string()
        ),
    )
    .expect("write config");
    let output = cargo_bin_cmd!("champnet")
        .env_remove("CHAMPNET_MATCHES")
        .arg("--config")
        .arg(&fx.config)
        .args(["--format", "json", "common"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(json.as_array().map(Vec::len), Some(2));
}

#[test]
fn config_init_then_show() {
    let fx = fixture();
    let config = fx.dir.path().join("fresh").join("champnet.toml");

    cargo_bin_cmd!("champnet")
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    cargo_bin_cmd!("champnet")
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .code(1);

    let output = cargo_bin_cmd!("champnet")
        .arg("--config")
        .arg(&config)
        .args(["--format", "json", "config", "show"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(json["build"]["shards"], 1);
    assert_eq!(json["analytics"]["top_pairs"], 10);
}

#[test]
fn missing_matches_path_is_reported() {
    let fx = fixture();
    let output = cargo_bin_cmd!("champnet")
        .env_remove("CHAMPNET_MATCHES")
        .arg("--config")
        .arg(&fx.config)
        .arg("stats")
        .assert()
        .code(1)
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).expect("utf8");
    assert!(stderr.contains("no match file"), "stderr: {stderr}");
}
