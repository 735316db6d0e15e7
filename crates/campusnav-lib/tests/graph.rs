mod common;

use campusnav_lib::graph::{EdgeRecord, NodeRecord};
use campusnav_lib::{build_graph, Error, GraphData, NodeKind};

use common::{builtin_campus, fixture_campus};

fn node(id: &str, kind: NodeKind, x: f64, y: f64) -> NodeRecord {
    NodeRecord {
        id: id.to_string(),
        kind,
        x,
        y,
    }
}

fn edge(from: &str, to: &str) -> EdgeRecord {
    EdgeRecord {
        from: from.to_string(),
        to: to.to_string(),
    }
}

#[test]
fn builtin_graph_is_connected() {
    let campus = builtin_campus();
    let graph = &campus.graph;

    assert!(graph.unreachable_from(0).is_empty());
    assert_eq!(graph.nodes_of_kind(NodeKind::Gate).len(), 3);
    for node in graph.all_nodes() {
        if node.kind().is_routable() {
            assert!(
                !graph.neighbours(node.id()).is_empty(),
                "{} should have neighbours",
                node.identifier()
            );
        }
    }
}

#[test]
fn adjacency_is_symmetric() {
    let campus = builtin_campus();
    let graph = &campus.graph;

    for node in graph.all_nodes() {
        for &next in graph.neighbours(node.id()) {
            assert!(
                graph.are_adjacent(next, node.id()),
                "{} -> {} is one-way",
                node.identifier(),
                graph.node(next).unwrap().identifier()
            );
            assert_ne!(next, node.id());
        }
    }
}

#[test]
fn csv_fixture_graph_loads() {
    let campus = fixture_campus();
    let graph = &campus.graph;

    assert_eq!(graph.len(), 5);
    assert_eq!(graph.edge_count(), 5);
    let gate = graph.get_node("main gate").expect("gate present");
    assert_eq!(gate.kind(), NodeKind::Gate);
    assert_eq!((gate.x(), gate.y()), (0.0, 0.0));
    assert_eq!(
        graph
            .nodes_of_kind(NodeKind::Walkway)
            .iter()
            .map(|n| n.identifier())
            .collect::<Vec<_>>(),
        vec!["walkway1", "walkway2"]
    );
}

#[test]
fn isolated_building_is_rejected() {
    let data = GraphData {
        nodes: vec![
            node("building1", NodeKind::Building, 0.0, 0.0),
            node("walkway1", NodeKind::Walkway, 10.0, 0.0),
            node("building2", NodeKind::Building, 50.0, 50.0),
        ],
        edges: vec![edge("building1", "walkway1")],
    };

    let err = build_graph(&data).expect_err("building2 has no neighbours");
    assert!(matches!(err, Error::DisconnectedNode { identifier } if identifier == "building2"));
}

#[test]
fn separate_components_are_rejected() {
    let data = GraphData {
        nodes: vec![
            node("building1", NodeKind::Building, 0.0, 0.0),
            node("walkway1", NodeKind::Walkway, 10.0, 0.0),
            node("building2", NodeKind::Building, 50.0, 50.0),
            node("walkway2", NodeKind::Walkway, 60.0, 50.0),
        ],
        edges: vec![edge("building1", "walkway1"), edge("building2", "walkway2")],
    };

    let err = build_graph(&data).expect_err("two components");
    match err {
        Error::DisconnectedGraph { unreachable } => {
            assert_eq!(unreachable, vec!["building2", "walkway2"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_finite_coordinates_are_rejected() {
    let data = GraphData {
        nodes: vec![
            node("building1", NodeKind::Building, 0.0, 0.0),
            node("walkway1", NodeKind::Walkway, f64::NAN, 0.0),
        ],
        edges: vec![edge("building1", "walkway1")],
    };

    let err = build_graph(&data).expect_err("NaN coordinate");
    assert!(matches!(err, Error::InvalidCoordinate { identifier } if identifier == "walkway1"));
}

#[test]
fn unknown_edge_endpoint_is_rejected() {
    let data = GraphData {
        nodes: vec![node("building1", NodeKind::Building, 0.0, 0.0)],
        edges: vec![edge("building1", "walkway9")],
    };

    let err = build_graph(&data).expect_err("walkway9 is undeclared");
    assert!(matches!(err, Error::UnknownEdgeEndpoint { identifier, .. } if identifier == "walkway9"));
}

#[test]
fn self_loops_and_duplicates_are_rejected() {
    let looped = GraphData {
        nodes: vec![node("walkway1", NodeKind::Walkway, 0.0, 0.0)],
        edges: vec![edge("walkway1", "walkway1")],
    };
    assert!(matches!(
        build_graph(&looped),
        Err(Error::SelfLoop { .. })
    ));

    let duplicated = GraphData {
        nodes: vec![
            node("walkway1", NodeKind::Walkway, 0.0, 0.0),
            node("walkway1", NodeKind::Walkway, 5.0, 0.0),
        ],
        edges: Vec::new(),
    };
    assert!(matches!(
        build_graph(&duplicated),
        Err(Error::DuplicateNode { .. })
    ));
}
