pub mod types;

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::errors::RouteGraphError;

pub use types::{MAX_EDGE_WEIGHT, RouteEdge, Weight, parse_weight};

/// Undirected graph stored as two mirrored adjacency records per edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteGraph {
    adjacency: BTreeMap<String, BTreeMap<String, Weight>>,
}

impl RouteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges<'a, I>(edges: I) -> Result<Self, RouteGraphError>
    where
        I: IntoIterator<Item = &'a RouteEdge>,
    {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(&edge.source, &edge.destination, edge.weight)?;
        }
        Ok(graph)
    }

    pub fn add_edge(
        &mut self,
        source: &str,
        destination: &str,
        weight: i64,
    ) -> Result<(), RouteGraphError> {
        let weight = types::validate_edge(source, destination, weight)?;
        self.adjacency
            .entry(source.to_string())
            .or_default()
            .insert(destination.to_string(), weight);
        self.adjacency
            .entry(destination.to_string())
            .or_default()
            .insert(source.to_string(), weight);
        debug!(source, destination, weight, "edge stored");
        Ok(())
    }

    // nodes left without neighbours are dropped
    pub fn delete_edge(&mut self, source: &str, destination: &str) -> bool {
        let forward = self.remove_record(source, destination);
        let backward = self.remove_record(destination, source);
        debug_assert_eq!(
            forward, backward,
            "asymmetric adjacency for {source}-{destination}"
        );
        if forward {
            debug!(source, destination, "edge deleted");
        }
        forward || backward
    }

    pub fn neighbors(&self, node: &str) -> BTreeMap<String, Weight> {
        self.adjacency.get(node).cloned().unwrap_or_default()
    }

    pub fn adjacent<'a>(
        &'a self,
        node: &str,
    ) -> impl Iterator<Item = (&'a str, Weight)> + use<'a> {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|neighbors| neighbors.iter().map(|(label, w)| (label.as_str(), *w)))
    }

    pub fn nodes(&self) -> BTreeSet<String> {
        self.adjacency.keys().cloned().collect()
    }

    pub fn node_labels(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn contains_node(&self, node: &str) -> bool {
        self.adjacency.contains_key(node)
    }

    pub fn edge_weight(&self, source: &str, destination: &str) -> Option<Weight> {
        self.adjacency
            .get(source)
            .and_then(|neighbors| neighbors.get(destination))
            .copied()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn edges(&self) -> Vec<(String, String, Weight)> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for (node, neighbors) in &self.adjacency {
            for (neighbor, weight) in neighbors {
                if node < neighbor {
                    edges.push((node.clone(), neighbor.clone(), *weight));
                }
            }
        }
        edges
    }

    fn remove_record(&mut self, from: &str, to: &str) -> bool {
        let Some(neighbors) = self.adjacency.get_mut(from) else {
            return false;
        };
        let removed = neighbors.remove(to).is_some();
        if neighbors.is_empty() {
            self.adjacency.remove(from);
        }
        removed
    }
}
