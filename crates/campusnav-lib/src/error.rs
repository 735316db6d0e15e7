use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the campus navigation library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// An absent location node was handed to building/floor resolution.
    #[error("location node cannot be absent")]
    InvalidNode,

    /// Raised when a location name could not be found in the location tree.
    #[error("unknown location: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when the destination input is empty.
    #[error("destination can't be empty")]
    EmptyDestination,

    /// Raised when the origin and destination resolve to the same place.
    #[error("{name} is both the origin and the destination; no directions needed")]
    SameLocation { name: String },

    /// Raised when a location exists in the tree but has no routable graph node.
    #[error("location {name} does not map to a routable campus node")]
    UnroutableLocation { name: String },

    /// Raised when no route could be found between two graph nodes.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a computed route plan lacks any nodes.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Raised when the same node identifier is declared twice.
    #[error("duplicate graph node identifier: {identifier}")]
    DuplicateNode { identifier: String },

    /// Raised when an edge references a node that was never declared.
    #[error("edge {from} -> {to} references unknown node {identifier}")]
    UnknownEdgeEndpoint {
        from: String,
        to: String,
        identifier: String,
    },

    /// Raised when an edge connects a node to itself.
    #[error("edge connects node {identifier} to itself")]
    SelfLoop { identifier: String },

    /// Raised when a node carries a non-finite coordinate.
    #[error("node {identifier} has a non-finite coordinate")]
    InvalidCoordinate { identifier: String },

    /// Raised when a building or gate node has no walkway or building neighbour.
    #[error("routable node {identifier} has no walkway or building neighbour")]
    DisconnectedNode { identifier: String },

    /// Raised when parts of the graph cannot be reached from the rest of it.
    #[error("campus graph is not connected; unreachable nodes: {}", .unreachable.join(", "))]
    DisconnectedGraph { unreachable: Vec<String> },

    /// Raised when the same location name appears twice in the location data.
    #[error("duplicate location name: {name}")]
    DuplicateLocation { name: String },

    /// Raised when location data is structurally invalid.
    #[error("invalid location data: {message}")]
    InvalidLocationData { message: String },

    /// Raised when a data file has an extension we cannot parse.
    #[error("unsupported campus data file {path}")]
    UnsupportedDataFormat { path: PathBuf },

    /// Raised when a data directory does not contain the expected files.
    #[error("campus data not found in {path}")]
    DataNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for campus data")]
    ProjectDirsUnavailable,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
