//! Snapshots of a [`RouteGraph`] on disk.
//!
//! Two formats are understood, chosen by file extension: `.json` files hold a
//! versioned JSON document, every other path is a SQLite database. Both store
//! the two directed records of each edge and both are checked for symmetry
//! on load.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use ahash::{AHashMap, AHashSet};
use rusqlite::{Connection, OpenFlags, params};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    errors::RouteGraphError,
    graph::{RouteGraph, types::validate_edge},
    schema::{SCHEMA_VERSION, SNAPSHOT_FORMAT, check_meta, ensure_schema, write_meta},
    seed::SeedDataset,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotFormat {
    Sqlite,
    Json,
}

impl SnapshotFormat {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SnapshotFormat::Json,
            _ => SnapshotFormat::Sqlite,
        }
    }
}

/// Where a restored graph came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphOrigin {
    Snapshot,
    Seed,
}

#[derive(Clone, Debug)]
pub struct Restored {
    pub graph: RouteGraph,
    pub origin: GraphOrigin,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotDocument {
    format: String,
    version: i64,
    adjacency: Vec<NodeEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeEntry {
    node: String,
    neighbors: Vec<AdjacencyRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct AdjacencyRecord {
    neighbor: String,
    weight: i64,
}

type DirectedRecord = (String, String, i64);

pub fn save<P: AsRef<Path>>(graph: &RouteGraph, location: P) -> Result<(), RouteGraphError> {
    let path = location.as_ref();
    match SnapshotFormat::for_path(path) {
        SnapshotFormat::Sqlite => save_sqlite(graph, path)?,
        SnapshotFormat::Json => save_json(graph, path)?,
    }
    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "snapshot saved"
    );
    Ok(())
}

pub fn load<P: AsRef<Path>>(location: P) -> Result<RouteGraph, RouteGraphError> {
    let path = location.as_ref();
    let records = match SnapshotFormat::for_path(path) {
        SnapshotFormat::Sqlite => read_sqlite(path)?,
        SnapshotFormat::Json => read_json(path)?,
    };
    let graph = assemble(records)?;
    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "snapshot loaded"
    );
    Ok(graph)
}

/// Loads the snapshot at `location`, falling back to `seed` when it is
/// missing or invalid.
pub fn load_or_seed<P: AsRef<Path>>(
    location: P,
    seed: &SeedDataset,
) -> Result<Restored, RouteGraphError> {
    let path = location.as_ref();
    match load(path) {
        Ok(graph) => Ok(Restored {
            graph,
            origin: GraphOrigin::Snapshot,
        }),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "no usable snapshot, using seed dataset");
            Ok(Restored {
                graph: seed.build()?,
                origin: GraphOrigin::Seed,
            })
        }
    }
}

fn save_sqlite(graph: &RouteGraph, path: &Path) -> Result<(), RouteGraphError> {
    let mut conn = Connection::open(path).map_err(persistence_err)?;
    ensure_schema(&conn)?;
    let tx = conn.transaction().map_err(persistence_err)?;
    tx.execute("DELETE FROM route_adjacency", [])
        .map_err(persistence_err)?;
    write_meta(&tx)?;
    {
        let mut stmt = tx
            .prepare("INSERT INTO route_adjacency(node, neighbor, weight) VALUES(?1, ?2, ?3)")
            .map_err(persistence_err)?;
        for node in graph.node_labels() {
            for (neighbor, weight) in graph.adjacent(node) {
                stmt.execute(params![node, neighbor, weight as i64])
                    .map_err(persistence_err)?;
            }
        }
    }
    tx.commit().map_err(persistence_err)?;
    Ok(())
}

fn read_sqlite(path: &Path) -> Result<Vec<DirectedRecord>, RouteGraphError> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|e| RouteGraphError::persistence(format!("{}: {e}", path.display())))?;
    check_meta(&conn)?;
    let mut stmt = conn
        .prepare("SELECT node, neighbor, weight FROM route_adjacency ORDER BY node, neighbor")
        .map_err(persistence_err)?;
    let rows = stmt
        .query_map([], |row| -> rusqlite::Result<DirectedRecord> {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })
        .map_err(persistence_err)?;
    let mut records = Vec::new();
    for row in rows {
        records.push(row.map_err(persistence_err)?);
    }
    Ok(records)
}

/// Writes to a sibling temp file and renames it over `path`, so a failed save
/// leaves the previous snapshot intact.
fn save_json(graph: &RouteGraph, path: &Path) -> Result<(), RouteGraphError> {
    let document = SnapshotDocument {
        format: SNAPSHOT_FORMAT.to_string(),
        version: SCHEMA_VERSION,
        adjacency: graph
            .node_labels()
            .map(|node| NodeEntry {
                node: node.to_string(),
                neighbors: graph
                    .adjacent(node)
                    .map(|(neighbor, weight)| AdjacencyRecord {
                        neighbor: neighbor.to_string(),
                        weight: weight as i64,
                    })
                    .collect(),
            })
            .collect(),
    };
    let staging = staging_path(path);
    {
        let file = File::create(&staging).map_err(persistence_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &document).map_err(persistence_err)?;
        writer.flush().map_err(persistence_err)?;
    }
    fs::rename(&staging, path).map_err(|e| {
        let _ = fs::remove_file(&staging);
        persistence_err(e)
    })?;
    Ok(())
}

fn read_json(path: &Path) -> Result<Vec<DirectedRecord>, RouteGraphError> {
    let file = File::open(path)
        .map_err(|e| RouteGraphError::persistence(format!("{}: {e}", path.display())))?;
    let document: SnapshotDocument =
        serde_json::from_reader(BufReader::new(file)).map_err(persistence_err)?;
    if document.format != SNAPSHOT_FORMAT {
        return Err(RouteGraphError::persistence(format!(
            "not a route snapshot (format marker {:?})",
            document.format
        )));
    }
    if document.version != SCHEMA_VERSION {
        return Err(RouteGraphError::persistence(format!(
            "unsupported snapshot version {}",
            document.version
        )));
    }
    let mut seen = AHashSet::with_capacity(document.adjacency.len());
    let mut records = Vec::new();
    for NodeEntry { node, neighbors } in document.adjacency {
        if neighbors.is_empty() {
            return Err(RouteGraphError::persistence(format!(
                "node {node} has no edges"
            )));
        }
        if !seen.insert(node.clone()) {
            return Err(RouteGraphError::persistence(format!(
                "node {node} listed twice"
            )));
        }
        for record in neighbors {
            records.push((node.clone(), record.neighbor, record.weight));
        }
    }
    Ok(records)
}

/// Validates directed records and rebuilds the graph from them. Every record
/// must be a valid edge, appear once, and be mirrored with the same weight.
fn assemble(records: Vec<DirectedRecord>) -> Result<RouteGraph, RouteGraphError> {
    let mut directed: AHashMap<(String, String), i64> = AHashMap::with_capacity(records.len());
    for (node, neighbor, weight) in records {
        validate_edge(&node, &neighbor, weight).map_err(|err| {
            RouteGraphError::persistence(format!("corrupt record {node}->{neighbor}: {err}"))
        })?;
        if directed
            .insert((node.clone(), neighbor.clone()), weight)
            .is_some()
        {
            return Err(RouteGraphError::persistence(format!(
                "duplicate record {node}->{neighbor}"
            )));
        }
    }
    let mut graph = RouteGraph::new();
    for ((node, neighbor), weight) in &directed {
        match directed.get(&(neighbor.clone(), node.clone())) {
            Some(mirror) if mirror == weight => {}
            Some(mirror) => {
                return Err(RouteGraphError::persistence(format!(
                    "asymmetric weight {node}->{neighbor}: {weight} vs {mirror}"
                )));
            }
            None => {
                return Err(RouteGraphError::persistence(format!(
                    "missing mirror record for {node}->{neighbor}"
                )));
            }
        }
        if node < neighbor {
            graph.add_edge(node, neighbor, *weight)?;
        }
    }
    debug!(records = directed.len(), "snapshot records validated");
    Ok(graph)
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn persistence_err<E: std::fmt::Display>(err: E) -> RouteGraphError {
    RouteGraphError::persistence(err.to_string())
}
