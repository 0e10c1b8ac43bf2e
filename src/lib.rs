//! Weighted undirected route graph: edge mutation, Dijkstra shortest paths,
//! simple-path enumeration and on-disk snapshots.
//! Run Criterion benchmarks with `cargo bench` to inspect reports under `target/criterion`.

pub mod bench_utils;
pub mod cli;
pub mod client;
pub mod dijkstra;
pub mod errors;
pub mod graph;
pub mod navigator;
pub mod paths;
pub mod persistence;
pub mod schema;
pub mod seed;

pub use crate::dijkstra::{Route, shortest_path, shortest_route};
pub use crate::errors::RouteGraphError;
pub use crate::graph::{RouteEdge, RouteGraph, Weight};
pub use crate::navigator::{Navigator, PathListener, RouteReport};
pub use crate::paths::{PathSet, SearchBudget, all_simple_paths, all_simple_paths_bounded};
pub use crate::persistence::{GraphOrigin, Restored, SnapshotFormat, load, load_or_seed, save};
pub use crate::seed::SeedDataset;
