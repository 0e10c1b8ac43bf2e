use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    errors::RouteGraphError,
    graph::{RouteEdge, RouteGraph},
};

pub const MAX_WEIGHT: i64 = 100;

#[derive(Clone, Debug)]
pub struct GraphDataset {
    pub node_count: usize,
    pub edges: Vec<RouteEdge>,
}

impl GraphDataset {
    pub fn edges(&self) -> usize {
        self.edges.len()
    }

    pub fn build(&self) -> Result<RouteGraph, RouteGraphError> {
        RouteGraph::from_edges(&self.edges)
    }
}

#[derive(Clone, Debug)]
pub enum GraphShape {
    Line,
    Grid2D { width: usize, height: usize },
    RandomErdosRenyi { edges: usize },
    Complete,
}

pub fn node_label(idx: usize) -> String {
    format!("n{idx:05}")
}

/// Weighted graph of the given shape with weights in `1..=MAX_WEIGHT`.
/// The same `seed` always yields the same dataset.
pub fn generate_graph(shape: GraphShape, node_count: usize, seed: u64) -> GraphDataset {
    assert!(node_count > 1, "node_count must exceed 1");
    let mut rng = StdRng::seed_from_u64(seed);
    let pairs: Vec<(usize, usize)> = match shape {
        GraphShape::Line => (0..node_count - 1).map(|idx| (idx, idx + 1)).collect(),
        GraphShape::Grid2D { width, height } => grid_pairs(width, height, node_count),
        GraphShape::RandomErdosRenyi { edges } => random_pairs(node_count, edges, &mut rng),
        GraphShape::Complete => (0..node_count)
            .flat_map(|a| ((a + 1)..node_count).map(move |b| (a, b)))
            .collect(),
    };
    let edges = pairs
        .into_iter()
        .map(|(a, b)| {
            let weight = rng.gen_range(1..=MAX_WEIGHT);
            RouteEdge::new(node_label(a), node_label(b), weight)
        })
        .collect();
    GraphDataset { node_count, edges }
}

fn grid_pairs(width: usize, height: usize, node_count: usize) -> Vec<(usize, usize)> {
    assert_eq!(
        width * height,
        node_count,
        "grid dimensions must match node count"
    );
    let mut pairs = Vec::with_capacity(width * height * 2);
    for y in 0..height {
        for x in 0..width {
            let base = y * width + x;
            if x + 1 < width {
                pairs.push((base, base + 1));
            }
            if y + 1 < height {
                pairs.push((base, base + width));
            }
        }
    }
    pairs
}

fn random_pairs(node_count: usize, edge_count: usize, rng: &mut StdRng) -> Vec<(usize, usize)> {
    let total_pairs = node_count * (node_count - 1) / 2;
    assert!(edge_count <= total_pairs, "edge_count exceeds possible pairs");
    let mut chosen = ahash::AHashSet::with_capacity(edge_count);
    let mut pairs = Vec::with_capacity(edge_count);
    while pairs.len() < edge_count {
        let a = rng.gen_range(0..node_count);
        let b = rng.gen_range(0..node_count);
        if a == b {
            continue;
        }
        let pair = (a.min(b), a.max(b));
        if chosen.insert(pair) {
            pairs.push(pair);
        }
    }
    pairs.sort_unstable();
    pairs
}
