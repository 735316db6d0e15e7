use std::collections::{HashMap, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Dense index of a node inside a [`CampusGraph`].
pub type NodeId = usize;

/// Classification of a campus graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Building,
    Gate,
    Walkway,
}

impl NodeKind {
    /// Buildings and gates can be route endpoints; walkways are transit only.
    pub fn is_routable(self) -> bool {
        matches!(self, NodeKind::Building | NodeKind::Gate)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            NodeKind::Building => "building",
            NodeKind::Gate => "gate",
            NodeKind::Walkway => "walkway",
        };
        f.write_str(value)
    }
}

/// Pixel coordinates on the campus map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate the Euclidean distance to another point.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Vertex in the campus walking graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    id: NodeId,
    identifier: String,
    kind: NodeKind,
    position: Point,
}

impl GraphNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Graph key, e.g. `building1`, `main gate` or `walkway12`.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }
}

/// One row of the node table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
}

/// One row of the edge table; edges are bidirectional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
}

/// Flat node list plus flat edge list describing a campus graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

/// Read-only campus graph used by the path engine.
///
/// Nodes are owned by the graph and addressed by [`NodeId`]. Adjacency is
/// symmetric, deduplicated and free of self-loops.
#[derive(Debug, Clone, Default)]
pub struct CampusGraph {
    nodes: Vec<GraphNode>,
    index: HashMap<String, NodeId>,
    adjacency: Vec<Vec<NodeId>>,
}

impl CampusGraph {
    /// Start assembling a graph node by node.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Lookup a node by its dense index.
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    /// Lookup a node by its graph key.
    pub fn get_node(&self, identifier: &str) -> Option<&GraphNode> {
        self.node_id(identifier).and_then(|id| self.node(id))
    }

    /// Resolve a graph key to its dense index.
    pub fn node_id(&self, identifier: &str) -> Option<NodeId> {
        self.index.get(identifier).copied()
    }

    /// Return the neighbours for a given node.
    pub fn neighbours(&self, id: NodeId) -> &[NodeId] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbours(a).contains(&b)
    }

    /// Snapshot of every node in declaration order.
    pub fn all_nodes(&self) -> Vec<&GraphNode> {
        self.nodes.iter().collect()
    }

    /// Snapshot of the nodes of a single kind in declaration order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> Vec<&GraphNode> {
        self.nodes.iter().filter(|node| node.kind == kind).collect()
    }

    /// Nodes that cannot be reached from `start` by walking edges.
    pub fn unreachable_from(&self, start: NodeId) -> Vec<NodeId> {
        if self.node(start).is_none() {
            return (0..self.nodes.len()).collect();
        }

        let mut seen = vec![false; self.nodes.len()];
        let mut queue = VecDeque::new();
        seen[start] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for &next in self.neighbours(current) {
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }

        seen.iter()
            .enumerate()
            .filter(|(_, reached)| !**reached)
            .map(|(id, _)| id)
            .collect()
    }

    // Gate-to-gate links alone do not connect a node to the walkways.
    fn has_walkable_neighbour(&self, id: NodeId) -> bool {
        self.neighbours(id).iter().any(|&next| {
            self.node(next)
                .is_some_and(|n| matches!(n.kind, NodeKind::Walkway | NodeKind::Building))
        })
    }

    /// Check the integrity rules a loaded campus must satisfy.
    ///
    /// Every coordinate must be finite, every building and gate needs at
    /// least one walkway or building neighbour, and the whole graph must form
    /// one component.
    pub fn validate(&self) -> Result<()> {
        for node in &self.nodes {
            if !node.position.is_finite() {
                return Err(Error::InvalidCoordinate {
                    identifier: node.identifier.clone(),
                });
            }
            if node.kind.is_routable() && !self.has_walkable_neighbour(node.id) {
                return Err(Error::DisconnectedNode {
                    identifier: node.identifier.clone(),
                });
            }
        }

        if self.nodes.is_empty() {
            return Ok(());
        }

        let unreachable = self.unreachable_from(0);
        if !unreachable.is_empty() {
            return Err(Error::DisconnectedGraph {
                unreachable: unreachable
                    .into_iter()
                    .map(|id| self.nodes[id].identifier.clone())
                    .collect(),
            });
        }

        Ok(())
    }
}

/// Incremental constructor for [`CampusGraph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<GraphNode>,
    index: HashMap<String, NodeId>,
    adjacency: Vec<Vec<NodeId>>,
}

impl GraphBuilder {
    /// Declare a node. Identifiers must be unique.
    pub fn add_node(
        &mut self,
        identifier: impl Into<String>,
        kind: NodeKind,
        x: f64,
        y: f64,
    ) -> Result<NodeId> {
        let identifier = identifier.into();
        if self.index.contains_key(&identifier) {
            return Err(Error::DuplicateNode { identifier });
        }

        let id = self.nodes.len();
        self.index.insert(identifier.clone(), id);
        self.nodes.push(GraphNode {
            id,
            identifier,
            kind,
            position: Point::new(x, y),
        });
        self.adjacency.push(Vec::new());
        Ok(id)
    }

    /// Connect two declared nodes in both directions.
    ///
    /// Repeated edges are ignored; unknown endpoints and self-loops are errors.
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<()> {
        let lookup = |identifier: &str| {
            self.index
                .get(identifier)
                .copied()
                .ok_or_else(|| Error::UnknownEdgeEndpoint {
                    from: from.to_string(),
                    to: to.to_string(),
                    identifier: identifier.to_string(),
                })
        };
        let a = lookup(from)?;
        let b = lookup(to)?;

        if a == b {
            return Err(Error::SelfLoop {
                identifier: from.to_string(),
            });
        }

        if !self.adjacency[a].contains(&b) {
            self.adjacency[a].push(b);
        }
        if !self.adjacency[b].contains(&a) {
            self.adjacency[b].push(a);
        }
        Ok(())
    }

    pub fn build(self) -> CampusGraph {
        CampusGraph {
            nodes: self.nodes,
            index: self.index,
            adjacency: self.adjacency,
        }
    }
}

/// Build and validate a campus graph from its node and edge tables.
pub fn build_graph(data: &GraphData) -> Result<CampusGraph> {
    let mut builder = CampusGraph::builder();
    for record in &data.nodes {
        builder.add_node(record.id.clone(), record.kind, record.x, record.y)?;
    }
    for edge in &data.edges {
        builder.add_edge(&edge.from, &edge.to)?;
    }

    let graph = builder.build();
    graph.validate()?;
    debug!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        "built campus graph"
    );
    Ok(graph)
}
