use serde::{Deserialize, Serialize};

use crate::errors::RouteGraphError;

/// Distance carried by an edge. Stored unsigned; callers hand in signed
/// values so negative input can be rejected instead of wrapping.
pub type Weight = u64;

/// Largest weight a single edge may carry. Any simple path has fewer edges
/// than `u32::MAX`, so summed distances always fit in a [`Weight`].
pub const MAX_EDGE_WEIGHT: i64 = u32::MAX as i64;

/// One undirected edge as it appears in seed files and edge listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct RouteEdge {
    pub source: String,
    pub destination: String,
    pub weight: i64,
}

impl RouteEdge {
    pub fn new<S: Into<String>, D: Into<String>>(source: S, destination: D, weight: i64) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            weight,
        }
    }
}

pub fn validate_label(label: &str, role: &str) -> Result<(), RouteGraphError> {
    if label.trim().is_empty() {
        return Err(RouteGraphError::invalid_input(format!(
            "{role} label must be set"
        )));
    }
    Ok(())
}

pub fn validate_edge(
    source: &str,
    destination: &str,
    weight: i64,
) -> Result<Weight, RouteGraphError> {
    validate_label(source, "source")?;
    validate_label(destination, "destination")?;
    if source == destination {
        return Err(RouteGraphError::invalid_input(format!(
            "self loops are not supported ({source})"
        )));
    }
    if weight < 0 {
        return Err(RouteGraphError::invalid_input(format!(
            "weight must be non-negative, got {weight}"
        )));
    }
    if weight > MAX_EDGE_WEIGHT {
        return Err(RouteGraphError::invalid_input(format!(
            "weight {weight} exceeds the limit of {MAX_EDGE_WEIGHT}"
        )));
    }
    Ok(weight as Weight)
}

/// Parses weight text coming from a form field or command argument.
pub fn parse_weight(text: &str) -> Result<i64, RouteGraphError> {
    let trimmed = text.trim();
    let weight: i64 = trimmed
        .parse()
        .map_err(|_| RouteGraphError::invalid_input(format!("invalid weight '{trimmed}'")))?;
    if weight < 0 {
        return Err(RouteGraphError::invalid_input(format!(
            "weight must be non-negative, got {weight}"
        )));
    }
    Ok(weight)
}
