//! Validate command: load the campus data and report what was checked.

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use campusnav_lib::{Campus, DataSource, NodeKind};

use crate::commands::load_campus_from;
use crate::output::{to_json, OutputFormat};
use crate::terminal::ColorPalette;

/// Counts gathered from a campus that passed validation.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub source: String,
    pub nodes: usize,
    pub edges: usize,
    pub buildings: usize,
    pub gates: usize,
    pub walkways: usize,
    pub locations: usize,
    /// Locations that can be looked up but not routed to.
    pub unroutable: Vec<String>,
}

impl ValidationReport {
    pub fn new(source: &DataSource, campus: &Campus) -> Self {
        let source = match source {
            DataSource::Builtin => "builtin".to_string(),
            DataSource::Directory(dir) => dir.display().to_string(),
        };
        Self {
            source,
            nodes: campus.graph.len(),
            edges: campus.graph.edge_count(),
            buildings: campus.graph.nodes_of_kind(NodeKind::Building).len(),
            gates: campus.graph.nodes_of_kind(NodeKind::Gate).len(),
            walkways: campus.graph.nodes_of_kind(NodeKind::Walkway).len(),
            locations: campus.locations.len(),
            unroutable: campus
                .unroutable_locations()
                .into_iter()
                .map(|node| node.name().to_string())
                .collect(),
        }
    }

    pub fn format_text(&self, palette: &ColorPalette) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}Campus data OK{} ({})",
            palette.green, palette.reset, self.source
        );
        let _ = writeln!(
            out,
            "  nodes: {} ({} buildings, {} gates, {} walkways)",
            self.nodes,
            self.buildings,
            self.gates,
            self.walkways
        );
        let _ = writeln!(out, "  edges: {}", self.edges);
        let _ = writeln!(out, "  locations: {}", self.locations);
        if !self.unroutable.is_empty() {
            let _ = writeln!(
                out,
                "  {}unroutable:{} {}",
                palette.red,
                palette.reset,
                self.unroutable.join(", ")
            );
        }
        out
    }
}

/// Handle the validate subcommand. Loading performs the integrity checks.
pub fn handle_validate_command(
    data_dir: Option<&Path>,
    format: OutputFormat,
    palette: &ColorPalette,
) -> Result<()> {
    let (source, campus) = load_campus_from(data_dir)?;
    let report = ValidationReport::new(&source, &campus);
    let rendered = if format.is_json() {
        to_json(&report)?
    } else {
        report.format_text(palette)
    };
    print!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_report_counts_nodes() {
        let campus = Campus::builtin().unwrap();
        let report = ValidationReport::new(&DataSource::Builtin, &campus);

        assert_eq!(report.gates, 3);
        assert_eq!(
            report.nodes,
            report.buildings + report.gates + report.walkways
        );
        assert!(report.unroutable.is_empty());
        assert!(report
            .format_text(&ColorPalette::plain())
            .starts_with("Campus data OK (builtin)"));
    }
}
