use serde::Serialize;

use crate::storage::{GraphStore, PairCounts};

const MAX_FINDINGS: usize = 32;

/// Indicates the severity level of a verification finding.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifySeverity {
    /// Informational message about the verification pass.
    Info,
    /// Suspicious but not invariant-breaking.
    Warning,
    /// A graph invariant does not hold.
    Error,
}

/// Represents a single issue discovered during verification.
#[derive(Clone, Debug, Serialize)]
pub struct VerifyFinding {
    /// The severity level of this finding.
    pub severity: VerifySeverity,
    /// Human-readable description of the issue.
    pub message: String,
}

impl VerifyFinding {
    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: VerifySeverity::Error,
            message: message.into(),
        }
    }

    fn info(message: impl Into<String>) -> Self {
        Self {
            severity: VerifySeverity::Info,
            message: message.into(),
        }
    }
}

/// Totals gathered while scanning the adjacency map.
#[derive(Clone, Debug, Default, Serialize)]
pub struct VerifyCounts {
    /// Champions scanned.
    pub nodes_checked: u64,
    /// Directed adjacency entries scanned (twice the edge count when sound).
    pub adjacency_entries: u64,
    /// Edges compared against aggregated pair counts.
    pub pairs_compared: u64,
}

/// Outcome of [`verify`].
#[derive(Clone, Debug, Serialize)]
pub struct VerifyReport {
    /// True when no error finding was recorded.
    pub success: bool,
    /// Issues found, capped at an internal limit.
    pub findings: Vec<VerifyFinding>,
    /// Scan totals.
    pub counts: VerifyCounts,
}

/// Checks the structural invariants of a built graph.
///
/// Symmetry, absence of self-loops, non-zero weights and the recorded edge
/// count are always checked. When `counts` is given, every edge weight must
/// also equal the aggregated count for its pair, and every counted pair must
/// be present as an edge.
pub fn verify(graph: &GraphStore, counts: Option<&PairCounts>) -> VerifyReport {
    let mut findings = Vec::new();
    let mut tally = VerifyCounts::default();

    for (champion, neighbors) in graph.iter() {
        tally.nodes_checked += 1;
        for (&other, &weight) in neighbors {
            tally.adjacency_entries += 1;
            if other == champion {
                push_error(&mut findings, format!("self-loop on champion {champion}"));
                continue;
            }
            if weight == 0 {
                push_error(
                    &mut findings,
                    format!("edge {champion} -- {other} has zero weight"),
                );
            }
            match graph.weight(other, champion) {
                Some(back) if back == weight => {}
                Some(back) => push_error(
                    &mut findings,
                    format!("edge {champion} -- {other} is asymmetric ({weight} vs {back})"),
                ),
                None => push_error(
                    &mut findings,
                    format!("edge {champion} -> {other} has no reverse entry"),
                ),
            }
        }
    }

    if tally.adjacency_entries != 2 * graph.edge_count() as u64 {
        push_error(
            &mut findings,
            format!(
                "edge count {} does not match {} adjacency entries",
                graph.edge_count(),
                tally.adjacency_entries
            ),
        );
    }

    if let Some(counts) = counts {
        for edge in graph.all_edges() {
            tally.pairs_compared += 1;
            let expected = counts.get(edge.a, edge.b);
            if expected != edge.weight {
                push_error(
                    &mut findings,
                    format!(
                        "edge {} -- {} has weight {} but {} co-occurrences were counted",
                        edge.a, edge.b, edge.weight, expected
                    ),
                );
            }
        }
        if counts.len() as u64 != tally.pairs_compared {
            push_error(
                &mut findings,
                format!(
                    "{} pairs were counted but the graph holds {} edges",
                    counts.len(),
                    tally.pairs_compared
                ),
            );
        }
    }

    let success = !findings
        .iter()
        .any(|f| f.severity == VerifySeverity::Error);
    if success {
        findings.push(VerifyFinding::info(format!(
            "{} champions and {} edges verified",
            graph.node_count(),
            graph.edge_count()
        )));
    }

    VerifyReport {
        success,
        findings,
        counts: tally,
    }
}

fn push_error(findings: &mut Vec<VerifyFinding>, message: String) {
    if findings.len() < MAX_FINDINGS {
        findings.push(VerifyFinding::error(message));
    }
}
