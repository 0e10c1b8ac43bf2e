use routegraph::{
    RouteGraph, RouteGraphError, SeedDataset,
    bench_utils::{GraphShape, generate_graph, node_label},
    dijkstra::{shortest_path, shortest_route},
    graph::MAX_EDGE_WEIGHT,
    paths::{all_simple_paths, path_distance},
};

fn build_graph(edges: &[(&str, &str, i64)]) -> RouteGraph {
    let mut graph = RouteGraph::new();
    for &(a, b, w) in edges {
        graph.add_edge(a, b, w).expect("edge");
    }
    graph
}

#[test]
fn test_shortest_path_prefers_lighter_detour() {
    let graph = build_graph(&[("A", "B", 1), ("B", "C", 1), ("A", "C", 5)]);
    assert_eq!(shortest_path(&graph, "A", "C"), vec!["A", "B", "C"]);
    let route = shortest_route(&graph, "A", "C").expect("route");
    assert_eq!(route.distance, 2);
}

#[test]
fn test_shortest_path_direct_edge_when_cheaper() {
    let graph = build_graph(&[("A", "B", 4), ("B", "C", 4), ("A", "C", 5)]);
    assert_eq!(shortest_path(&graph, "A", "C"), vec!["A", "C"]);
}

#[test]
fn test_shortest_path_not_exists() {
    let graph = build_graph(&[("A", "B", 1), ("C", "D", 1)]);
    assert!(shortest_path(&graph, "A", "D").is_empty());
    assert_eq!(shortest_route(&graph, "A", "D"), None);
}

#[test]
fn test_shortest_path_unknown_nodes() {
    let graph = build_graph(&[("A", "B", 1)]);
    assert!(shortest_path(&graph, "A", "Z").is_empty());
    assert!(shortest_path(&graph, "Z", "A").is_empty());
    assert!(shortest_path(&RouteGraph::new(), "A", "B").is_empty());
}

#[test]
fn test_shortest_path_to_self() {
    let graph = build_graph(&[("A", "B", 1)]);
    let route = shortest_route(&graph, "A", "A").expect("route");
    assert_eq!(route.nodes, vec!["A"]);
    assert_eq!(route.distance, 0);
}

#[test]
fn test_shortest_path_follows_updated_weights() {
    let mut graph = build_graph(&[("A", "B", 1), ("B", "C", 1), ("A", "C", 5)]);
    graph.add_edge("A", "C", 1).expect("overwrite");
    assert_eq!(shortest_path(&graph, "A", "C"), vec!["A", "C"]);
    graph.delete_edge("A", "C");
    assert_eq!(shortest_path(&graph, "A", "C"), vec!["A", "B", "C"]);
}

#[test]
fn test_shortest_path_deterministic_across_insert_order() {
    let mut edges = vec![("A", "B", 2), ("A", "C", 2), ("B", "D", 2), ("C", "D", 2)];
    let first = build_graph(&edges);
    edges.reverse();
    let second = build_graph(&edges);
    assert_eq!(
        shortest_path(&first, "A", "D"),
        shortest_path(&second, "A", "D")
    );
    assert_eq!(shortest_path(&first, "A", "D"), vec!["A", "B", "D"]);
}

#[test]
fn test_seed_route_between_distant_cities() {
    let graph = SeedDataset::builtin().build().expect("seed");
    let route = shortest_route(&graph, "Szczecin", "Krakow").expect("route");
    assert_eq!(route.nodes.first().map(String::as_str), Some("Szczecin"));
    assert_eq!(route.nodes.last().map(String::as_str), Some("Krakow"));
    assert_eq!(path_distance(&graph, &route.nodes), Some(route.distance));
}

#[test]
fn test_shortest_route_matches_exhaustive_minimum() {
    for seed in 0..20u64 {
        let dataset = generate_graph(GraphShape::RandomErdosRenyi { edges: 14 }, 8, seed);
        let graph = dataset.build().expect("dataset");
        let (source, destination) = (node_label(0), node_label(7));
        let best = all_simple_paths(&graph, &source, &destination)
            .iter()
            .filter_map(|path| path_distance(&graph, path))
            .min();
        let route = shortest_route(&graph, &source, &destination);
        assert_eq!(route.as_ref().map(|r| r.distance), best, "seed {seed}");
        if let Some(route) = route {
            assert_eq!(path_distance(&graph, &route.nodes), Some(route.distance));
        }
    }
}

#[test]
fn test_shortest_route_with_heaviest_weights_keeps_exact_distance() {
    let max = MAX_EDGE_WEIGHT;
    let graph = build_graph(&[
        ("S", "x", max),
        ("x", "y", max),
        ("y", "T", 1),
        ("S", "b", max),
        ("b", "c", max),
        ("c", "T", max),
    ]);
    let route = shortest_route(&graph, "S", "T").expect("route");
    assert_eq!(route.nodes, vec!["S", "x", "y", "T"]);
    assert_eq!(route.distance, 2 * max as u64 + 1);
    assert_eq!(path_distance(&graph, &route.nodes), Some(route.distance));
}

#[test]
fn test_weights_beyond_limit_are_rejected() {
    let mut graph = RouteGraph::new();
    for weight in [MAX_EDGE_WEIGHT + 1, i64::MAX] {
        let err = graph.add_edge("S", "T", weight).expect_err("too heavy");
        assert!(matches!(err, RouteGraphError::InvalidInput(_)));
    }
    assert!(graph.is_empty());
}
