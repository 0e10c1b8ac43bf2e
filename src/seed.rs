//! Starting data for a graph that has no snapshot yet.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    errors::RouteGraphError,
    graph::{RouteEdge, RouteGraph},
};

/// City pairs with road distances in km.
const BUILTIN_ROUTES: &[(&str, &str, i64)] = &[
    ("Warsaw", "Lodz", 135),
    ("Warsaw", "Krakow", 295),
    ("Warsaw", "Poznan", 310),
    ("Warsaw", "Gdansk", 340),
    ("Warsaw", "Lublin", 170),
    ("Lodz", "Wroclaw", 220),
    ("Lodz", "Katowice", 200),
    ("Krakow", "Katowice", 80),
    ("Krakow", "Lublin", 270),
    ("Katowice", "Wroclaw", 200),
    ("Wroclaw", "Poznan", 180),
    ("Poznan", "Gdansk", 300),
    ("Gdansk", "Szczecin", 350),
    ("Poznan", "Szczecin", 240),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeedDataset {
    pub edges: Vec<RouteEdge>,
}

impl SeedDataset {
    pub fn builtin() -> Self {
        Self {
            edges: BUILTIN_ROUTES
                .iter()
                .map(|&(source, destination, weight)| RouteEdge::new(source, destination, weight))
                .collect(),
        }
    }

    /// Parses a JSON array of `{"source", "destination", "weight"}` objects.
    pub fn from_json_str(text: &str) -> Result<Self, RouteGraphError> {
        serde_json::from_str(text)
            .map_err(|e| RouteGraphError::invalid_input(format!("seed dataset: {e}")))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, RouteGraphError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            RouteGraphError::invalid_input(format!("seed dataset {}: {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    pub fn build(&self) -> Result<RouteGraph, RouteGraphError> {
        RouteGraph::from_edges(&self.edges)
    }
}

impl Default for SeedDataset {
    fn default() -> Self {
        Self::builtin()
    }
}
