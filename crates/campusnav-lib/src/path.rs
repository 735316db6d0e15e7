use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::graph::{CampusGraph, GraphNode, NodeId};
use crate::location::LocationNode;
use crate::resolver::to_graph_key;

/// Straight-line pixel distance between two graph nodes.
pub fn euclidean_distance(a: &GraphNode, b: &GraphNode) -> f64 {
    a.position().distance_to(&b.position())
}

/// Total walking distance along `path`, or `None` when two consecutive
/// entries are not adjacent or an index is unknown.
pub fn path_distance(graph: &CampusGraph, path: &[NodeId]) -> Option<f64> {
    let mut total = 0.0;
    for pair in path.windows(2) {
        if !graph.are_adjacent(pair[0], pair[1]) {
            return None;
        }
        let a = graph.node(pair[0])?;
        let b = graph.node(pair[1])?;
        total += euclidean_distance(a, b);
    }
    Some(total)
}

/// Find the minimum-distance path between `start` and `end` with Dijkstra's
/// algorithm. Edge weights are Euclidean pixel distances.
///
/// Returns `None` when either endpoint is unknown or no path exists. The
/// returned path starts with `start`, ends with `end`, and every consecutive
/// pair is adjacent.
pub fn find_path(graph: &CampusGraph, start: NodeId, end: NodeId) -> Option<Vec<NodeId>> {
    search(graph, start, end, |_| 0.0)
}

/// A* variant of [`find_path`] guided by the straight-line distance to `end`.
///
/// Straight-line distance never overestimates a walk along Euclidean edges,
/// so the result has the same total distance as [`find_path`].
pub fn find_path_a_star(graph: &CampusGraph, start: NodeId, end: NodeId) -> Option<Vec<NodeId>> {
    let goal = graph.node(end)?.position();
    search(graph, start, end, |node| {
        graph
            .node(node)
            .map(|n| n.position().distance_to(&goal))
            .unwrap_or(0.0)
    })
}

/// Resolve two graph keys and run [`find_path`] between them.
pub fn find_path_by_key(graph: &CampusGraph, start: &str, end: &str) -> Option<Vec<NodeId>> {
    let start = graph.node_id(start)?;
    let end = graph.node_id(end)?;
    find_path(graph, start, end)
}

/// Route between two building-level location nodes.
///
/// Returns `None` if either node is absent, has no graph key, or the key is
/// not present in `graph`.
pub fn find_path_from_tree_nodes(
    from_building: Option<&LocationNode>,
    to_building: Option<&LocationNode>,
    graph: &CampusGraph,
) -> Option<Vec<NodeId>> {
    let from_key = to_graph_key(from_building)?;
    let to_key = to_graph_key(to_building)?;
    find_path_by_key(graph, &from_key, &to_key)
}

fn search<H>(graph: &CampusGraph, start: NodeId, end: NodeId, heuristic: H) -> Option<Vec<NodeId>>
where
    H: Fn(NodeId) -> f64,
{
    let start_node = graph.node(start)?;
    graph.node(end)?;

    if start == end {
        return Some(vec![start]);
    }

    let mut distances = vec![f64::INFINITY; graph.len()];
    let mut previous: Vec<Option<NodeId>> = vec![None; graph.len()];
    let mut visited = vec![false; graph.len()];
    let mut queue = MinHeap::new();
    let mut pushes = 1usize;

    distances[start] = 0.0;
    queue.insert(start, heuristic(start));

    while let Some(entry) = queue.extract_min() {
        let current = entry.node;
        if visited[current] {
            // Stale duplicate from an earlier relaxation.
            continue;
        }
        visited[current] = true;

        if current == end {
            break;
        }
        if entry.priority.0.is_infinite() {
            break;
        }

        let Some(current_node) = graph.node(current) else {
            continue;
        };

        for &next in graph.neighbours(current) {
            if visited.get(next).copied().unwrap_or(true) {
                continue;
            }
            let Some(next_node) = graph.node(next) else {
                continue;
            };

            let weight = euclidean_distance(current_node, next_node);
            if weight.is_infinite() || weight.is_nan() {
                continue;
            }

            let candidate = distances[current] + weight;
            if candidate < distances[next] {
                distances[next] = candidate;
                previous[next] = Some(current);
                queue.insert(next, candidate + heuristic(next));
                pushes += 1;
            }
        }
    }

    debug!(
        from = start_node.identifier(),
        settled = visited.iter().filter(|v| **v).count(),
        pushes,
        "path search finished"
    );

    if !visited[end] {
        return None;
    }

    reconstruct_path(&previous, start, end)
}

fn reconstruct_path(previous: &[Option<NodeId>], start: NodeId, end: NodeId) -> Option<Vec<NodeId>> {
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        // A chain longer than the node count can only mean a corrupt cycle.
        if path.len() > previous.len() {
            return None;
        }
        current = previous.get(current).copied().flatten()?;
        path.push(current);
    }
    path.reverse();
    Some(path)
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeId,
    priority: FloatOrd,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by priority.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Array-backed binary min-heap of `(node, priority)` pairs.
///
/// There is no decrease-key; callers push duplicates and skip stale entries
/// when they are popped.
#[derive(Debug, Default)]
struct MinHeap {
    heap: BinaryHeap<QueueEntry>,
}

impl MinHeap {
    fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, node: NodeId, priority: f64) {
        self.heap.push(QueueEntry {
            node,
            priority: FloatOrd(priority),
        });
    }

    fn extract_min(&mut self) -> Option<QueueEntry> {
        self.heap.pop()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.heap.len()
    }
}
