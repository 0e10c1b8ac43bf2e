use serde_json::{Map, Value, json};

use crate::{
    errors::RouteGraphError,
    graph::parse_weight,
    navigator::Navigator,
    paths::connected_components,
};

/// Result of one command: the JSON line to print and whether the graph
/// changed and should be written back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandOutput {
    pub json: String,
    pub mutated: bool,
}

pub fn handle_command(
    navigator: &Navigator,
    command: &str,
    args: &[String],
) -> Result<CommandOutput, RouteGraphError> {
    match command {
        "status" => run_status(navigator).map(read_only),
        "nodes" => run_nodes(navigator).map(read_only),
        "neighbors" => run_neighbors(navigator, args).map(read_only),
        "route" => run_route(navigator, args).map(read_only),
        "paths" => run_paths(navigator, args).map(read_only),
        "components" => run_components(navigator).map(read_only),
        "add" => run_add(navigator, args).map(mutated),
        "delete" => run_delete(navigator, args),
        "save" => run_save().map(mutated),
        other => Err(RouteGraphError::invalid_input(format!(
            "unknown command {other}"
        ))),
    }
}

fn run_status(navigator: &Navigator) -> Result<String, RouteGraphError> {
    let graph = navigator.snapshot();
    let mut object = command_object("status");
    object.insert("nodes".into(), json!(graph.node_count()));
    object.insert("edges".into(), json!(graph.edge_count()));
    encode(object)
}

fn run_nodes(navigator: &Navigator) -> Result<String, RouteGraphError> {
    let mut object = command_object("nodes");
    object.insert("nodes".into(), json!(navigator.nodes()));
    encode(object)
}

fn run_neighbors(navigator: &Navigator, args: &[String]) -> Result<String, RouteGraphError> {
    let node = positional(args, 0, "NODE")?;
    let mut object = command_object("neighbors");
    object.insert("node".into(), json!(node));
    object.insert("neighbors".into(), json!(navigator.neighbors(node)));
    encode(object)
}

fn run_add(navigator: &Navigator, args: &[String]) -> Result<String, RouteGraphError> {
    let source = positional(args, 0, "SOURCE")?;
    let destination = positional(args, 1, "DESTINATION")?;
    let weight = parse_weight(positional(args, 2, "WEIGHT")?)?;
    navigator.add_edge(source, destination, weight)?;
    let mut object = command_object("add");
    object.insert("source".into(), json!(source));
    object.insert("destination".into(), json!(destination));
    object.insert("weight".into(), json!(weight));
    encode(object)
}

fn run_delete(navigator: &Navigator, args: &[String]) -> Result<CommandOutput, RouteGraphError> {
    let source = positional(args, 0, "SOURCE")?;
    let destination = positional(args, 1, "DESTINATION")?;
    let deleted = navigator.delete_edge(source, destination);
    let mut object = command_object("delete");
    object.insert("source".into(), json!(source));
    object.insert("destination".into(), json!(destination));
    object.insert("deleted".into(), json!(deleted));
    Ok(CommandOutput {
        json: encode(object)?,
        mutated: deleted,
    })
}

fn run_route(navigator: &Navigator, args: &[String]) -> Result<String, RouteGraphError> {
    let source = positional(args, 0, "SOURCE")?;
    let destination = positional(args, 1, "DESTINATION")?;
    let mut object = command_object("route");
    object.insert("source".into(), json!(source));
    object.insert("destination".into(), json!(destination));
    match navigator.shortest_route(source, destination) {
        Some(route) => {
            object.insert("path".into(), json!(route.nodes));
            object.insert("distance".into(), json!(route.distance));
        }
        None => {
            object.insert("path".into(), json!([]));
            object.insert("distance".into(), Value::Null);
        }
    }
    encode(object)
}

fn run_paths(navigator: &Navigator, args: &[String]) -> Result<String, RouteGraphError> {
    let source = positional(args, 0, "SOURCE")?;
    let destination = positional(args, 1, "DESTINATION")?;
    let report = navigator.find_routes(source, destination);
    let mut object = command_object("paths");
    object.insert("source".into(), json!(source));
    object.insert("destination".into(), json!(destination));
    object.insert("paths".into(), json!(report.paths));
    object.insert("truncated".into(), json!(report.truncated));
    object.insert("shortest".into(), json!(report.shortest));
    object.insert("summary".into(), json!(report.render()));
    encode(object)
}

fn run_components(navigator: &Navigator) -> Result<String, RouteGraphError> {
    let graph = navigator.snapshot();
    let mut object = command_object("components");
    object.insert("components".into(), json!(connected_components(&graph)));
    encode(object)
}

fn run_save() -> Result<String, RouteGraphError> {
    encode(command_object("save"))
}

fn command_object(command: &str) -> Map<String, Value> {
    let mut object = Map::new();
    object.insert("command".into(), Value::String(command.into()));
    object
}

fn positional<'a>(
    args: &'a [String],
    index: usize,
    name: &str,
) -> Result<&'a str, RouteGraphError> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| RouteGraphError::invalid_input(format!("missing argument {name}")))
}

fn read_only(json: String) -> CommandOutput {
    CommandOutput {
        json,
        mutated: false,
    }
}

fn mutated(json: String) -> CommandOutput {
    CommandOutput {
        json,
        mutated: true,
    }
}

fn encode(object: Map<String, Value>) -> Result<String, RouteGraphError> {
    serde_json::to_string(&Value::Object(object))
        .map_err(|e| RouteGraphError::invalid_input(e.to_string()))
}
