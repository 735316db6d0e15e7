//! Nodes command: list graph nodes, optionally filtered by kind.

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use campusnav_lib::{CampusGraph, NodeKind};

use crate::commands::load_campus_from;
use crate::output::{to_json, OutputFormat};
use crate::terminal::ColorPalette;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NodeKindArg {
    Building,
    Gate,
    Walkway,
}

impl From<NodeKindArg> for NodeKind {
    fn from(value: NodeKindArg) -> Self {
        match value {
            NodeKindArg::Building => NodeKind::Building,
            NodeKindArg::Gate => NodeKind::Gate,
            NodeKindArg::Walkway => NodeKind::Walkway,
        }
    }
}

/// One row of the node listing.
#[derive(Debug, Clone, Serialize)]
pub struct NodeEntry {
    pub identifier: String,
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
    pub neighbours: Vec<String>,
}

/// Collect the listing in declaration order.
pub fn collect_nodes(graph: &CampusGraph, kind: Option<NodeKind>) -> Vec<NodeEntry> {
    let nodes = match kind {
        Some(kind) => graph.nodes_of_kind(kind),
        None => graph.all_nodes(),
    };
    nodes
        .into_iter()
        .map(|node| NodeEntry {
            identifier: node.identifier().to_string(),
            kind: node.kind(),
            x: node.x(),
            y: node.y(),
            neighbours: graph
                .neighbours(node.id())
                .iter()
                .filter_map(|&id| graph.node(id))
                .map(|n| n.identifier().to_string())
                .collect(),
        })
        .collect()
}

pub fn format_nodes_text(entries: &[NodeEntry], palette: &ColorPalette) -> String {
    let width = entries
        .iter()
        .map(|entry| entry.identifier.len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for entry in entries {
        let kind = entry.kind.to_string();
        let _ = writeln!(
            out,
            "{}{:<width$}{} {kind:<8} ({:.0}, {:.0}) {}-> {}{}",
            palette.white_bold,
            entry.identifier,
            palette.reset,
            entry.x,
            entry.y,
            palette.gray,
            entry.neighbours.join(", "),
            palette.reset,
        );
    }
    let _ = writeln!(out, "{} nodes", entries.len());
    out
}

/// Handle the nodes subcommand.
pub fn handle_nodes_command(
    data_dir: Option<&Path>,
    format: OutputFormat,
    palette: &ColorPalette,
    kind: Option<NodeKindArg>,
) -> Result<()> {
    let (_, campus) = load_campus_from(data_dir)?;
    let entries = collect_nodes(&campus.graph, kind.map(NodeKind::from));
    let rendered = if format.is_json() {
        to_json(&entries)?
    } else {
        format_nodes_text(&entries, palette)
    };
    print!("{rendered}");
    Ok(())
}
