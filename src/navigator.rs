use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Write as _,
    path::Path,
    sync::Arc,
};

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::debug;

use crate::{
    dijkstra::{Route, shortest_route},
    errors::RouteGraphError,
    graph::{RouteGraph, Weight},
    paths::{SearchBudget, all_simple_paths_bounded},
    persistence,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteReport {
    pub source: String,
    pub destination: String,
    pub paths: Vec<Vec<String>>,
    pub truncated: bool,
    pub shortest: Option<Route>,
}

impl RouteReport {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.shortest.is_none()
    }

    pub fn render(&self) -> String {
        if self.is_empty() {
            return format!(
                "No path found between {} and {}",
                self.source, self.destination
            );
        }
        let mut out = String::from("All possible paths:\n");
        for path in &self.paths {
            let _ = writeln!(out, "{}", path.join(" -> "));
        }
        if self.truncated {
            out.push_str("(more paths exist, search budget exhausted)\n");
        }
        if let Some(route) = &self.shortest {
            let _ = write!(
                out,
                "\nShortest path: {} (Total distance: {} km)",
                route.nodes.join(" -> "),
                route.distance
            );
        }
        out
    }
}

pub trait PathListener: Send + Sync {
    fn on_routes_computed(&self, report: &RouteReport);
}

/// Listeners run after the graph lock is released.
pub struct Navigator {
    graph: Mutex<RouteGraph>,
    listeners: RwLock<Vec<Arc<dyn PathListener>>>,
    budget: SearchBudget,
}

impl Navigator {
    pub fn new(graph: RouteGraph) -> Self {
        Self::with_budget(graph, SearchBudget::unbounded())
    }

    pub fn with_budget(graph: RouteGraph, budget: SearchBudget) -> Self {
        Self {
            graph: Mutex::new(graph),
            listeners: RwLock::new(Vec::new()),
            budget,
        }
    }

    pub fn subscribe(&self, listener: Arc<dyn PathListener>) {
        self.listeners.write().push(listener);
    }

    pub fn add_edge(
        &self,
        source: &str,
        destination: &str,
        weight: i64,
    ) -> Result<(), RouteGraphError> {
        self.graph.lock().add_edge(source, destination, weight)
    }

    pub fn delete_edge(&self, source: &str, destination: &str) -> bool {
        self.graph.lock().delete_edge(source, destination)
    }

    pub fn nodes(&self) -> BTreeSet<String> {
        self.graph.lock().nodes()
    }

    pub fn neighbors(&self, node: &str) -> BTreeMap<String, Weight> {
        self.graph.lock().neighbors(node)
    }

    pub fn find_routes(&self, source: &str, destination: &str) -> RouteReport {
        let report = {
            let graph = self.graph.lock();
            let found = all_simple_paths_bounded(&graph, source, destination, self.budget);
            RouteReport {
                source: source.to_string(),
                destination: destination.to_string(),
                paths: found.paths,
                truncated: found.truncated,
                shortest: shortest_route(&graph, source, destination),
            }
        };
        debug!(
            source,
            destination,
            paths = report.paths.len(),
            truncated = report.truncated,
            "routes computed"
        );
        let listeners = self.listeners.read().clone();
        for listener in listeners {
            listener.on_routes_computed(&report);
        }
        report
    }

    pub fn shortest_route(&self, source: &str, destination: &str) -> Option<Route> {
        shortest_route(&self.graph.lock(), source, destination)
    }

    pub fn save<P: AsRef<Path>>(&self, location: P) -> Result<(), RouteGraphError> {
        let graph = self.graph.lock();
        persistence::save(&graph, location)
    }

    pub fn snapshot(&self) -> RouteGraph {
        self.graph.lock().clone()
    }

    pub fn into_graph(self) -> RouteGraph {
        self.graph.into_inner()
    }
}
