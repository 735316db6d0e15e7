//! Campus navigation library entry points.
//!
//! This crate loads the campus walking graph and location tree, resolves
//! free-text location names to buildings and floors, and runs shortest-path
//! searches between buildings. Higher-level consumers (the CLI) should only
//! depend on the functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod dataset;
pub mod directions;
pub mod error;
pub mod graph;
pub mod location;
pub mod output;
pub mod path;
pub mod resolver;
pub mod routing;

pub use dataset::{load_campus, resolve_data_source, Campus, DataSource, DATA_DIR_ENV};
pub use directions::Directions;
pub use error::{Error, Result};
pub use graph::{build_graph, CampusGraph, GraphData, GraphNode, NodeId, NodeKind, Point};
pub use location::{LocationData, LocationKind, LocationNode, LocationTree};
pub use output::{RouteRenderMode, RouteSummary};
pub use path::{find_path, find_path_a_star, find_path_from_tree_nodes, path_distance};
pub use resolver::{to_graph_key, Granularity, LocationContext, NodeResolver};
pub use routing::{plan_route, RouteAlgorithm, RoutePlan, RouteRequest};
