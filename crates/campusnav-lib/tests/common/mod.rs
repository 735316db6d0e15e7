//! Shared fixture helpers for integration tests.

use std::path::PathBuf;

use campusnav_lib::{Campus, CampusGraph, NodeKind};

/// Path to the fixtures directory (small CSV campus plus location tree).
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Campus loaded from the fixture directory.
#[allow(dead_code)]
pub fn fixture_campus() -> Campus {
    Campus::load_dir(&fixtures_dir()).expect("fixture campus loads")
}

/// Campus shipped with the library.
#[allow(dead_code)]
pub fn builtin_campus() -> Campus {
    Campus::builtin().expect("builtin campus loads")
}

/// Build an unvalidated graph from `(identifier, kind, x, y)` rows and edge pairs.
#[allow(dead_code)]
pub fn graph_from(nodes: &[(&str, NodeKind, f64, f64)], edges: &[(&str, &str)]) -> CampusGraph {
    let mut builder = CampusGraph::builder();
    for (identifier, kind, x, y) in nodes {
        builder
            .add_node(*identifier, *kind, *x, *y)
            .expect("unique node");
    }
    for (from, to) in edges {
        builder.add_edge(from, to).expect("valid edge");
    }
    builder.build()
}
