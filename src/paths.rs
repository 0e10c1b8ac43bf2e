use std::collections::VecDeque;

use ahash::AHashSet;
use serde::Serialize;

use crate::graph::{RouteGraph, Weight};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchBudget {
    pub max_paths: Option<usize>,
    pub max_expansions: Option<usize>,
}

impl SearchBudget {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn paths(limit: usize) -> Self {
        Self {
            max_paths: Some(limit),
            max_expansions: None,
        }
    }

    pub fn expansions(limit: usize) -> Self {
        Self {
            max_paths: None,
            max_expansions: Some(limit),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PathSet {
    pub paths: Vec<Vec<String>>,
    pub truncated: bool,
}

pub fn all_simple_paths(
    graph: &RouteGraph,
    source: &str,
    destination: &str,
) -> Vec<Vec<String>> {
    all_simple_paths_bounded(graph, source, destination, SearchBudget::unbounded()).paths
}

pub fn all_simple_paths_bounded(
    graph: &RouteGraph,
    source: &str,
    destination: &str,
    budget: SearchBudget,
) -> PathSet {
    if !graph.contains_node(source) || !graph.contains_node(destination) {
        return PathSet::default();
    }
    let mut search = PathSearch {
        graph,
        destination,
        budget,
        visited: AHashSet::with_capacity(graph.node_count()),
        path: Vec::with_capacity(graph.node_count()),
        found: Vec::new(),
        expansions: 0,
        truncated: false,
    };
    search.visit(source);
    PathSet {
        paths: search.found,
        truncated: search.truncated,
    }
}

struct PathSearch<'g> {
    graph: &'g RouteGraph,
    destination: &'g str,
    budget: SearchBudget,
    visited: AHashSet<&'g str>,
    path: Vec<&'g str>,
    found: Vec<Vec<String>>,
    expansions: usize,
    truncated: bool,
}

impl<'g> PathSearch<'g> {
    fn visit(&mut self, node: &'g str) {
        if self
            .budget
            .max_expansions
            .is_some_and(|limit| self.expansions >= limit)
        {
            self.truncated = true;
            return;
        }
        self.expansions += 1;
        self.visited.insert(node);
        self.path.push(node);

        if node == self.destination {
            self.record();
        } else {
            let graph = self.graph;
            for (next, _) in graph.adjacent(node) {
                if self.truncated {
                    break;
                }
                if !self.visited.contains(next) {
                    self.visit(next);
                }
            }
        }

        self.path.pop();
        self.visited.remove(node);
    }

    fn record(&mut self) {
        if self
            .budget
            .max_paths
            .is_some_and(|limit| self.found.len() >= limit)
        {
            self.truncated = true;
            return;
        }
        self.found
            .push(self.path.iter().map(|label| label.to_string()).collect());
    }
}

/// `None` unless every consecutive pair in `path` is an edge.
pub fn path_distance<S: AsRef<str>>(graph: &RouteGraph, path: &[S]) -> Option<Weight> {
    let first = path.first()?;
    if !graph.contains_node(first.as_ref()) {
        return None;
    }
    path.windows(2).try_fold(0 as Weight, |total, pair| {
        graph
            .edge_weight(pair[0].as_ref(), pair[1].as_ref())
            .and_then(|weight| total.checked_add(weight))
    })
}

pub fn connected_components(graph: &RouteGraph) -> Vec<Vec<String>> {
    let mut components = Vec::new();
    let mut visited = AHashSet::with_capacity(graph.node_count());
    for label in graph.node_labels() {
        if !visited.insert(label) {
            continue;
        }
        let mut queue = VecDeque::new();
        queue.push_back(label);
        let mut component = Vec::new();
        while let Some(node) = queue.pop_front() {
            component.push(node.to_string());
            for (next, _) in graph.adjacent(node) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        component.sort();
        components.push(component);
    }
    components.sort_by(|a, b| a[0].cmp(&b[0]));
    components
}
