//! Route command handler for computing walks between campus locations.

use std::path::Path;

use anyhow::Result;
use clap::ValueEnum;

use campusnav_lib::{plan_route, RouteAlgorithm, RouteRequest, RouteSummary};

use crate::commands::load_campus_from;
use crate::output::{render_route, OutputFormat};
use crate::terminal::ColorPalette;

/// Algorithm choice exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AlgorithmArg {
    #[default]
    Dijkstra,
    #[value(name = "a-star", alias = "astar")]
    AStar,
}

impl From<AlgorithmArg> for RouteAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Dijkstra => RouteAlgorithm::Dijkstra,
            AlgorithmArg::AStar => RouteAlgorithm::AStar,
        }
    }
}

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting location; blank means the main gate.
    pub from: String,
    /// Destination location.
    pub to: String,
    pub algorithm: AlgorithmArg,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest::new(&self.from, &self.to).with_algorithm(self.algorithm.into())
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    data_dir: Option<&Path>,
    format: OutputFormat,
    palette: &ColorPalette,
    args: &RouteCommandArgs,
) -> Result<()> {
    let (_, campus) = load_campus_from(data_dir)?;
    let plan = plan_route(&campus, &args.to_request())?;
    let summary = RouteSummary::from_plan(&campus.graph, &plan)?;
    print!("{}", render_route(&summary, format, palette)?);
    Ok(())
}
