//! Route planning between two free-text campus locations.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported search algorithms (Dijkstra, A*)
//! - [`RouteRequest`] - High-level route planning request
//! - [`RoutePlan`] - Planned route result
//! - [`plan_route`] - Main entry point for computing routes
//!
//! # Example
//!
//! ```no_run
//! use campusnav_lib::{plan_route, Campus, RouteRequest};
//!
//! let campus = Campus::builtin()?;
//! let plan = plan_route(&campus, &RouteRequest::new("1a37", "2b5"))?;
//! println!("Route: {} hops, {:.0}px", plan.hop_count(), plan.distance);
//! # Ok::<(), campusnav_lib::Error>(())
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, DijkstraPlanner, RoutePlanner};

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::dataset::Campus;
use crate::directions::Directions;
use crate::error::{Error, Result};
use crate::graph::NodeId;
use crate::location::{normalize_name, LocationNode, LocationTree};
use crate::path::path_distance;
use crate::resolver::{to_graph_key, Granularity, LocationContext};

/// Origin used when the "from" input is left blank.
pub const DEFAULT_ORIGIN: &str = "main gate";

/// Maximum number of "did you mean" suggestions attached to lookup errors.
const MAX_SUGGESTIONS: usize = 3;

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Dijkstra's algorithm (weighted graph).
    #[default]
    Dijkstra,
    /// A* search (heuristic guided).
    #[serde(rename = "a-star")]
    AStar,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

/// High-level route planning request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub from: String,
    pub to: String,
    pub algorithm: RouteAlgorithm,
}

impl RouteRequest {
    /// Dijkstra request between two free-text locations.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            algorithm: RouteAlgorithm::Dijkstra,
        }
    }

    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

/// One end of a planned route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedEndpoint {
    /// Name of the location the input matched.
    pub location: String,
    pub granularity: Granularity,
    pub building: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    /// Graph node the route starts or ends at.
    pub node: NodeId,
    pub graph_key: String,
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub from: PlannedEndpoint,
    pub to: PlannedEndpoint,
    pub steps: Vec<NodeId>,
    /// Total walking distance in map pixels.
    pub distance: f64,
    pub directions: Directions,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Trim and lowercase both inputs.
///
/// A blank origin defaults to [`DEFAULT_ORIGIN`]; a blank destination is an
/// [`Error::EmptyDestination`].
pub fn normalize_endpoints(from: &str, to: &str) -> Result<(String, String)> {
    let from = normalize_name(from);
    let to = normalize_name(to);

    let from = if from.is_empty() {
        DEFAULT_ORIGIN.to_string()
    } else {
        from
    };
    if to.is_empty() {
        return Err(Error::EmptyDestination);
    }
    Ok((from, to))
}

/// Look up a location, attaching fuzzy suggestions when it is unknown.
pub fn resolve_location<'a>(tree: &'a LocationTree, name: &str) -> Result<&'a LocationNode> {
    tree.get(name).ok_or_else(|| Error::UnknownLocation {
        name: name.to_string(),
        suggestions: tree.suggest(name, MAX_SUGGESTIONS),
    })
}

/// Plan a route between the two locations named in `request`.
pub fn plan_route(campus: &Campus, request: &RouteRequest) -> Result<RoutePlan> {
    let (from_name, to_name) = normalize_endpoints(&request.from, &request.to)?;
    let from_node = resolve_location(&campus.locations, &from_name)?;
    let to_node = resolve_location(&campus.locations, &to_name)?;

    if std::ptr::eq(from_node, to_node) {
        return Err(Error::SameLocation {
            name: from_node.name().to_string(),
        });
    }

    let resolver = campus.resolver();
    let from_context = resolver.locate(from_node)?;
    let to_context = resolver.locate(to_node)?;

    let from = planned_endpoint(campus, from_node, &from_context)?;
    let to = planned_endpoint(campus, to_node, &to_context)?;

    let planner = select_planner(request.algorithm);
    let route_not_found = || Error::RouteNotFound {
        start: from.graph_key.clone(),
        goal: to.graph_key.clone(),
    };
    let steps = planner
        .find_path(&campus.graph, from.node, to.node)
        .ok_or_else(route_not_found)?;
    let distance = path_distance(&campus.graph, &steps).ok_or_else(route_not_found)?;

    debug!(
        from = %from.graph_key,
        to = %to.graph_key,
        algorithm = %planner.algorithm(),
        hops = steps.len().saturating_sub(1),
        distance,
        "planned route"
    );

    Ok(RoutePlan {
        algorithm: planner.algorithm(),
        directions: Directions::between(&from_context, &to_context),
        from,
        to,
        steps,
        distance,
    })
}

fn planned_endpoint(
    campus: &Campus,
    input: &LocationNode,
    context: &LocationContext<'_>,
) -> Result<PlannedEndpoint> {
    let unroutable = || Error::UnroutableLocation {
        name: input.name().to_string(),
    };
    let building = context.building.ok_or_else(unroutable)?;
    let graph_key = to_graph_key(Some(building)).ok_or_else(unroutable)?;
    let node = campus.graph.node_id(&graph_key).ok_or_else(unroutable)?;

    Ok(PlannedEndpoint {
        location: input.name().to_string(),
        granularity: context.granularity(),
        building: building.name().to_string(),
        building_label: building.label().map(str::to_string),
        floor: context.floor.map(|floor| floor.name().to_string()),
        room: context.room.map(|room| room.name().to_string()),
        node,
        graph_key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_origin_defaults_to_main_gate() {
        let (from, to) = normalize_endpoints("   ", " 2B5 ").unwrap();
        assert_eq!(from, DEFAULT_ORIGIN);
        assert_eq!(to, "2b5");
    }

    #[test]
    fn blank_destination_is_rejected() {
        let err = normalize_endpoints("1a37", "").expect_err("empty destination");
        assert!(matches!(err, Error::EmptyDestination));
    }

    #[test]
    fn algorithm_display_matches_serde_names() {
        assert_eq!(RouteAlgorithm::Dijkstra.to_string(), "dijkstra");
        assert_eq!(
            serde_json::to_string(&RouteAlgorithm::AStar).unwrap(),
            "\"a-star\""
        );
    }
}
