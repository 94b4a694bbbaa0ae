#![allow(missing_docs)]

use std::sync::Arc;
use std::thread;

use champnet::{
    admin,
    model::MatchRecord,
    query::{AnalyticsEngine, QueryEngine},
    storage::{aggregate, build_graph, BuildOptions, Edge, GraphBuilder, GraphStore},
    types::{ChampionId, GraphError},
};

fn record(one: [u64; 5], two: [u64; 5]) -> MatchRecord {
    MatchRecord::from_ids(one, two).expect("valid record")
}

fn id(raw: u64) -> ChampionId {
    ChampionId(raw)
}

fn league() -> Vec<MatchRecord> {
    vec![
        record([1, 2, 3, 4, 5], [6, 7, 8, 9, 10]),
        record([1, 2, 11, 12, 13], [3, 4, 14, 15, 16]),
        record([5, 1, 2, 17, 18], [10, 9, 6, 19, 20]),
        record([21, 22, 23, 24, 25], [1, 6, 11, 16, 26]),
    ]
}

#[test]
fn single_match_builds_twenty_unit_edges() {
    let graph = build_graph(&[record([1, 2, 3, 4, 5], [6, 7, 8, 9, 10])]).unwrap();

    assert_eq!(graph.weight(id(1), id(2)), Some(1));
    assert_eq!(graph.weight(id(1), id(6)), None);
    assert_eq!(graph.edge_count(), 20);
    assert_eq!(graph.node_count(), 10);
    assert_eq!(graph.record_count(), 1);

    let common = AnalyticsEngine::new(&graph).common_pairs();
    let expected: Vec<Edge> = graph.all_edges().into_iter().take(10).collect();
    assert_eq!(common, expected);
    assert_eq!(
        (common[0].a, common[0].b),
        (id(1), id(2)),
        "ties resolve by ascending pair"
    );
    assert_eq!((common[9].a, common[9].b), (id(4), id(5)));
}

#[test]
fn repeated_roster_doubles_weight() {
    let graph = build_graph(&[
        record([1, 2, 3, 4, 5], [6, 7, 8, 9, 10]),
        record([1, 2, 3, 4, 5], [11, 12, 13, 14, 15]),
    ])
    .unwrap();

    assert_eq!(graph.weight(id(1), id(2)), Some(2));
    assert_eq!(graph.weight(id(6), id(7)), Some(1));
    let top = AnalyticsEngine::new(&graph).common_pairs();
    assert!(top.iter().all(|edge| edge.weight == 2));
}

#[test]
fn unknown_champion_is_not_found() {
    let graph = build_graph(&league()).unwrap();
    let query = QueryEngine::new(&graph);

    assert!(matches!(
        query.query_champion(id(99)),
        Err(GraphError::NotFound(ChampionId(99)))
    ));
    assert!(query.champion_pairs(id(99)).unwrap_err().is_not_found());
    assert!(graph.degree(id(99)).unwrap_err().is_not_found());
    assert!(AnalyticsEngine::new(&graph)
        .degree_centrality(id(99))
        .unwrap_err()
        .is_not_found());
}

#[test]
fn single_appearance_has_degree_four() {
    let graph = build_graph(&league()).unwrap();
    let analytics = AnalyticsEngine::new(&graph);

    let centrality = analytics.degree_centrality(id(25)).unwrap();
    assert_eq!(centrality.degree, 4);
    let expected = 4.0 / (graph.node_count() - 1) as f64;
    assert!((centrality.score - expected).abs() < 1e-12);
}

#[test]
fn weights_are_symmetric_and_edges_listed_once() {
    let graph = build_graph(&league()).unwrap();
    let edges = graph.all_edges();

    assert_eq!(edges.len(), graph.edge_count());
    for edge in &edges {
        assert!(edge.a < edge.b);
        assert_eq!(graph.weight(edge.b, edge.a), Some(edge.weight));
    }
    assert!(edges.windows(2).all(|w| (w[0].a, w[0].b) < (w[1].a, w[1].b)));
}

#[test]
fn champion_pairs_rank_heaviest_first() {
    let graph = build_graph(&league()).unwrap();
    let partners = QueryEngine::new(&graph).champion_pairs(id(1)).unwrap();

    assert_eq!(partners[0].champion, id(2));
    assert_eq!(partners[0].weight, 3);
    for pair in partners.windows(2) {
        assert!(
            pair[0].weight > pair[1].weight
                || (pair[0].weight == pair[1].weight && pair[0].champion < pair[1].champion)
        );
    }
    let neighbors = QueryEngine::new(&graph).query_champion(id(1)).unwrap();
    assert_eq!(partners.len(), neighbors.len());
}

#[test]
fn influential_ranking_is_sorted_and_scaled() {
    let graph = build_graph(&league()).unwrap();
    let ranking = AnalyticsEngine::new(&graph).most_influential_champions();

    assert_eq!(ranking.len(), graph.node_count());
    assert_eq!(ranking[0].champion, id(1));
    for pair in ranking.windows(2) {
        assert!(
            pair[0].degree > pair[1].degree
                || (pair[0].degree == pair[1].degree && pair[0].champion < pair[1].champion)
        );
    }
    let scale = 1.0 / (graph.node_count() - 1) as f64;
    for entry in &ranking {
        assert!((entry.score - entry.degree as f64 * scale).abs() < 1e-12);
    }
}

#[test]
fn analytics_repeat_identically() {
    let graph = build_graph(&league()).unwrap();
    let analytics = AnalyticsEngine::new(&graph);

    assert_eq!(analytics.common_pairs(), analytics.common_pairs());
    assert_eq!(
        analytics.find_isolated_champions(),
        analytics.find_isolated_champions()
    );
    assert_eq!(
        analytics.most_influential_champions(),
        analytics.most_influential_champions()
    );
    assert!(analytics.find_isolated_champions().is_empty());
}

#[test]
fn sharded_build_matches_sequential() {
    let records: Vec<MatchRecord> = league().into_iter().cycle().take(37).collect();
    let sequential = build_graph(&records).unwrap();
    for shards in [2, 3, 8, 64] {
        let sharded = GraphBuilder::new(BuildOptions::default().shards(shards))
            .build(&records)
            .unwrap();
        assert_eq!(sharded.all_edges(), sequential.all_edges(), "shards={shards}");
        assert_eq!(sharded.nodes(), sequential.nodes());
        assert_eq!(sharded.record_count(), 37);
    }
}

#[test]
fn built_graph_passes_verification() {
    let records = league();
    let graph = build_graph(&records).unwrap();
    let counts = aggregate(&records);

    let report = admin::verify(&graph, Some(&counts));
    assert!(report.success, "findings: {:?}", report.findings);
    assert_eq!(report.counts.adjacency_entries, 2 * graph.edge_count() as u64);

    let stats = admin::stats(&graph);
    assert_eq!(stats.records, 4);
    assert_eq!(stats.edges, graph.edge_count());
    assert_eq!(stats.total_weight, 80);
}

#[test]
fn concurrent_readers_share_one_graph() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphStore>();

    let graph = Arc::new(build_graph(&league()).unwrap());
    let expected = AnalyticsEngine::new(&graph).most_influential_champions();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let graph = Arc::clone(&graph);
            thread::spawn(move || {
                let analytics = AnalyticsEngine::new(&graph);
                let _ = analytics.common_pairs();
                analytics.most_influential_champions()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
