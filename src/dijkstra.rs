use std::{cmp::Reverse, collections::BinaryHeap};

use ahash::{AHashMap, AHashSet};
use serde::Serialize;

use crate::graph::{RouteGraph, Weight};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Route {
    pub nodes: Vec<String>,
    pub distance: Weight,
}

pub fn shortest_path(graph: &RouteGraph, source: &str, destination: &str) -> Vec<String> {
    shortest_route(graph, source, destination)
        .map(|route| route.nodes)
        .unwrap_or_default()
}

/// Dijkstra from `source`, stopping as soon as `destination` is settled.
///
/// Relaxation pushes a fresh heap entry instead of decreasing a key; stale
/// entries are skipped when popped. Heap entries order by `(distance, label)`
/// so equal distances settle in label order.
pub fn shortest_route(graph: &RouteGraph, source: &str, destination: &str) -> Option<Route> {
    if !graph.contains_node(source) || !graph.contains_node(destination) {
        return None;
    }
    let mut distances: AHashMap<&str, Weight> = AHashMap::with_capacity(graph.node_count());
    let mut parents: AHashMap<&str, &str> = AHashMap::new();
    let mut settled: AHashSet<&str> = AHashSet::with_capacity(graph.node_count());
    let mut queue = BinaryHeap::new();
    distances.insert(source, 0);
    queue.push(Reverse((0, source)));

    while let Some(Reverse((distance, node))) = queue.pop() {
        if !settled.insert(node) {
            continue;
        }
        if node == destination {
            return Some(Route {
                nodes: unwind(&parents, source, destination),
                distance,
            });
        }
        for (next, weight) in graph.adjacent(node) {
            if settled.contains(next) {
                continue;
            }
            let candidate = distance + weight;
            let improved = distances
                .get(next)
                .is_none_or(|&known| candidate < known);
            if improved {
                distances.insert(next, candidate);
                parents.insert(next, node);
                queue.push(Reverse((candidate, next)));
            }
        }
    }
    None
}

fn unwind(parents: &AHashMap<&str, &str>, source: &str, destination: &str) -> Vec<String> {
    let mut path = vec![destination.to_string()];
    let mut current = destination;
    while current != source {
        match parents.get(current) {
            Some(&parent) => {
                path.push(parent.to_string());
                current = parent;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
