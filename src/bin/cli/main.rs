//! Binary entry point for the champnet CLI.
#![forbid(unsafe_code)]

mod config;
mod ui;

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;

use champnet::{
    admin::{self, StatsReport, VerifyReport},
    cli::import::{load_matches, MatchImportConfig},
    logging::init_logging,
    model::MatchRecord,
    query::{AnalyticsEngine, Centrality, Partner, QueryEngine},
    storage::{aggregate, BuildOptions, Edge, GraphBuilder, GraphStore},
    types::ChampionId,
};

use config::{CliConfig, DEFAULT_LOG_FILTER};
use ui::{Theme, Ui};

#[derive(Parser, Debug)]
#[command(
    name = "champnet",
    version,
    about = "Champion co-occurrence graph over match records",
    disable_help_subcommand = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "CHAMPNET_MATCHES",
        value_name = "FILE",
        help = "CSV file with one match per row"
    )]
    matches: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        env = "CHAMPNET_CONFIG",
        value_name = "FILE",
        help = "Config file (defaults to the user config directory)"
    )]
    config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Output format for structured responses"
    )]
    format: OutputFormat,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = ThemeArg::Auto,
        help = "Color theme for text output"
    )]
    theme: ThemeArg,

    #[arg(long, global = true, help = "Plain output without icons or spinners")]
    quiet: bool,

    #[arg(
        long,
        global = true,
        value_name = "FILTER",
        help = "Log filter directive, e.g. `info` or `champnet=debug`"
    )]
    log_level: Option<String>,

    #[arg(long, global = true, value_name = "N", help = "Aggregation shards")]
    shards: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(about = "Print graph summary statistics")]
    Stats,

    #[command(about = "List the neighbors of a champion by id")]
    Query {
        #[arg(value_name = "ID")]
        champion: ChampionId,
    },

    #[command(about = "List a champion's partners, heaviest first")]
    Pairs {
        #[arg(value_name = "ID")]
        champion: ChampionId,

        #[arg(long, value_name = "N", help = "Show at most N partners")]
        limit: Option<usize>,
    },

    #[command(about = "Show the most frequent champion pairs")]
    Common {
        #[arg(long, value_name = "N", help = "Number of pairs (config default 10)")]
        top: Option<usize>,
    },

    #[command(about = "List champions that never shared a roster")]
    Isolated,

    #[command(about = "Rank champions by degree centrality")]
    Influential {
        #[arg(long, value_name = "N", help = "Show at most N champions")]
        limit: Option<usize>,
    },

    #[command(about = "Dump every edge in ascending order")]
    Edges,

    #[command(about = "Check graph invariants against recounted pairs")]
    Verify,

    #[command(subcommand, about = "Inspect or create the config file")]
    Config(ConfigCmd),
}

#[derive(Subcommand, Debug)]
enum ConfigCmd {
    #[command(about = "Print the effective configuration")]
    Show,

    #[command(about = "Write a config file with default values")]
    Init {
        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ThemeArg {
    Auto,
    Light,
    Dark,
    Plain,
}

impl From<ThemeArg> for Theme {
    fn from(theme: ThemeArg) -> Self {
        match theme {
            ThemeArg::Auto => Theme::Auto,
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Plain => Theme::Plain,
        }
    }
}

const EXIT_OK: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_VERIFY_FAILED: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(status) => ExitCode::from(status),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run() -> Result<u8, Box<dyn Error>> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.clone())?;

    let filter = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .or_else(|| config.log_filter().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_logging(&filter)?;

    let ui = Ui::new(cli.theme.into(), cli.quiet);

    if let Command::Config(cmd) = &cli.command {
        run_config(cmd, &cli, &config, &ui)?;
        return Ok(EXIT_OK);
    }

    let loaded = load_graph(&cli, &config, &ui)?;
    let graph = &loaded.graph;

    let mut status = EXIT_OK;
    match cli.command {
        Command::Stats => {
            let report = admin::stats(graph);
            emit(cli.format, &report, || print_stats_text(&ui, &report))?;
        }
        Command::Query { champion } => {
            let neighbors = QueryEngine::new(graph).query_champion(champion)?;
            let view = NeighborView {
                champion,
                degree: neighbors.len(),
                neighbors: neighbors
                    .iter()
                    .map(|(&champion, &weight)| Partner { champion, weight })
                    .collect(),
            };
            emit(cli.format, &view, || {
                print_partners_text(&ui, &format!("Neighbors of {champion}"), &view.neighbors)
            })?;
        }
        Command::Pairs { champion, limit } => {
            let mut partners = QueryEngine::new(graph).champion_pairs(champion)?;
            if let Some(limit) = limit {
                partners.truncate(limit);
            }
            emit(cli.format, &partners, || {
                print_partners_text(&ui, &format!("Partners of {champion}"), &partners)
            })?;
        }
        Command::Common { top } => {
            let top = top.unwrap_or_else(|| config.top_pairs());
            let pairs = AnalyticsEngine::new(graph).top_pairs(top);
            emit(cli.format, &pairs, || {
                print_edges_text(&ui, &format!("Top {top} pairs"), &pairs)
            })?;
        }
        Command::Isolated => {
            let isolated = AnalyticsEngine::new(graph).find_isolated_champions();
            emit(cli.format, &isolated, || {
                let rows: Vec<Vec<String>> =
                    isolated.iter().map(|id| vec![id.to_string()]).collect();
                ui.table("Isolated champions", &["champion"], &rows);
            })?;
        }
        Command::Influential { limit } => {
            let mut ranking = AnalyticsEngine::new(graph).most_influential_champions();
            if let Some(limit) = limit.or(config.influential_limit()) {
                ranking.truncate(limit);
            }
            emit(cli.format, &ranking, || print_centrality_text(&ui, &ranking))?;
        }
        Command::Edges => {
            let edges = graph.all_edges();
            emit(cli.format, &edges, || print_edges_text(&ui, "Edges", &edges))?;
        }
        Command::Verify => {
            let recount = aggregate(&loaded.matches);
            let report = admin::verify(graph, Some(&recount));
            emit(cli.format, &report, || print_verify_text(&ui, &report))?;
            status = verify_status(&report);
        }
        Command::Config(_) => unreachable!("config commands return before loading"),
    }
    Ok(status)
}

fn verify_status(report: &VerifyReport) -> u8 {
    if report.success {
        EXIT_OK
    } else {
        EXIT_VERIFY_FAILED
    }
}

struct LoadedGraph {
    matches: Vec<MatchRecord>,
    graph: GraphStore,
}

fn load_graph(cli: &Cli, config: &CliConfig, ui: &Ui) -> Result<LoadedGraph, Box<dyn Error>> {
    let path = cli
        .matches
        .clone()
        .or_else(|| config.matches_path().cloned())
        .ok_or("no match file given; pass --matches, set CHAMPNET_MATCHES or input.matches")?;
    let shards = cli.shards.unwrap_or_else(|| config.shards());
    if shards == 0 {
        return Err("--shards must be at least 1".into());
    }
    let [one, two] = config.team_prefixes();
    let import_cfg = MatchImportConfig::new(&path).team_prefixes(one, two);

    let spinner = ui.spinner(format!("Loading {}", path.display()));
    let summary = load_matches(&import_cfg)?;
    let graph = GraphBuilder::new(BuildOptions::default().shards(shards)).build(&summary.matches)?;
    let elapsed = spinner.finish();
    info!(
        rows = summary.rows,
        nodes = graph.node_count(),
        elapsed_ms = elapsed.as_millis() as u64,
        "cli.load.complete"
    );

    Ok(LoadedGraph {
        matches: summary.matches,
        graph,
    })
}

fn run_config(
    cmd: &ConfigCmd,
    cli: &Cli,
    config: &CliConfig,
    ui: &Ui,
) -> Result<(), Box<dyn Error>> {
    match cmd {
        ConfigCmd::Show => {
            let resolved = config.resolved();
            emit(cli.format, &resolved, || {
                match config.path() {
                    Some(path) if path.exists() => ui.info(&format!("config: {}", path.display())),
                    Some(path) => ui.info(&format!("config: {} (not found, defaults)", path.display())),
                    None => ui.info("config: none (defaults)"),
                }
                match config.render() {
                    Ok(rendered) => print!("{rendered}"),
                    Err(err) => ui.warn(&err.to_string()),
                }
            })?;
        }
        ConfigCmd::Init { force } => {
            let path = config.persist(*force)?;
            ui.success(&format!("Wrote config to {}", path.display()));
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct NeighborView {
    champion: ChampionId,
    degree: usize,
    neighbors: Vec<Partner>,
}

fn emit<T, F>(format: OutputFormat, value: &T, printer: F) -> Result<(), Box<dyn Error>>
where
    T: Serialize,
    F: FnOnce(),
{
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)?;
            println!("{json}");
        }
        OutputFormat::Text => printer(),
    }
    Ok(())
}

fn print_stats_text(ui: &Ui, report: &StatsReport) {
    ui.section(
        "Graph",
        [
            ("records", report.records.to_string()),
            ("champions", report.nodes.to_string()),
            ("pairs", report.edges.to_string()),
            ("total weight", report.total_weight.to_string()),
            ("max weight", report.max_weight.to_string()),
            ("mean degree", format!("{:.3}", report.mean_degree)),
            ("density", format!("{:.4}", report.density)),
            ("isolated", report.isolated.to_string()),
        ],
    );
}

fn print_partners_text(ui: &Ui, title: &str, partners: &[Partner]) {
    let rows: Vec<Vec<String>> = partners
        .iter()
        .map(|p| vec![p.champion.to_string(), p.weight.to_string()])
        .collect();
    ui.table(title, &["champion", "weight"], &rows);
}

fn print_edges_text(ui: &Ui, title: &str, edges: &[Edge]) {
    let rows: Vec<Vec<String>> = edges
        .iter()
        .map(|e| vec![e.a.to_string(), e.b.to_string(), e.weight.to_string()])
        .collect();
    ui.table(title, &["a", "b", "weight"], &rows);
}

fn print_centrality_text(ui: &Ui, ranking: &[Centrality]) {
    let rows: Vec<Vec<String>> = ranking
        .iter()
        .map(|c| {
            vec![
                c.champion.to_string(),
                c.degree.to_string(),
                format!("{:.4}", c.score),
            ]
        })
        .collect();
    ui.table("Degree centrality", &["champion", "degree", "score"], &rows);
}

fn print_verify_text(ui: &Ui, report: &VerifyReport) {
    ui.section(
        "Verify",
        [
            ("champions", report.counts.nodes_checked),
            ("adjacency entries", report.counts.adjacency_entries),
            ("pairs compared", report.counts.pairs_compared),
        ],
    );
    for finding in &report.findings {
        let line = format!("{:?}: {}", finding.severity, finding.message);
        match finding.severity {
            admin::VerifySeverity::Error | admin::VerifySeverity::Warning => ui.warn(&line),
            admin::VerifySeverity::Info => ui.info(&line),
        }
    }
    if report.success {
        ui.success("graph is consistent");
    } else {
        ui.warn("graph failed verification");
    }
}
