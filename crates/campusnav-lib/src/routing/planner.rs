//! Route planning strategies.
//!
//! Each algorithm is wrapped in a [`RoutePlanner`] so `plan_route` can stay
//! agnostic of the search that runs underneath.

use crate::graph::{CampusGraph, NodeId};
use crate::path::{find_path, find_path_a_star};

use super::RouteAlgorithm;

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Execute the pathfinding algorithm on the given graph.
    ///
    /// Returns `Some(path)` if a route is found, `None` otherwise.
    fn find_path(&self, graph: &CampusGraph, start: NodeId, goal: NodeId) -> Option<Vec<NodeId>>;
}

/// Dijkstra's algorithm over Euclidean edge weights.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(&self, graph: &CampusGraph, start: NodeId, goal: NodeId) -> Option<Vec<NodeId>> {
        find_path(graph, start, goal)
    }
}

/// A* search guided by straight-line distance to the goal.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarPlanner;

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(&self, graph: &CampusGraph, start: NodeId, goal: NodeId) -> Option<Vec<NodeId>> {
        find_path_a_star(graph, start, goal)
    }
}

/// Select the planner for an algorithm.
pub fn select_planner(algorithm: RouteAlgorithm) -> Box<dyn RoutePlanner> {
    match algorithm {
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::AStar => Box::new(AStarPlanner),
    }
}
