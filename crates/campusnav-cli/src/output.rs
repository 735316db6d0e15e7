//! Output formatting for route rendering.
//!
//! This module turns library summaries into the text, rich (markdown) and
//! JSON views selected with `--format`.

use std::fmt::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use campusnav_lib::output::{RouteEndpoint, RouteStep};
use campusnav_lib::{NodeKind, RouteRenderMode, RouteSummary};

use crate::terminal::{format_pixels, ColorPalette};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly text with tags and optional colors.
    #[default]
    Text,
    /// Markdown-flavoured text.
    Rich,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

/// Serialize any command result as pretty JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(value)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Render a route summary in the requested format.
pub fn render_route(
    summary: &RouteSummary,
    format: OutputFormat,
    palette: &ColorPalette,
) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(summary),
        OutputFormat::Rich => Ok(summary.render(RouteRenderMode::RichText)),
        OutputFormat::Text => Ok(render_route_text(summary, palette)),
    }
}

/// Tagged step list followed by the total distance and directions.
pub fn render_route_text(summary: &RouteSummary, palette: &ColorPalette) -> String {
    let p = palette;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Route from {}{}{} to {}{}{} ({} hops; algorithm: {}):",
        p.white_bold,
        endpoint_label(&summary.start),
        p.reset,
        p.white_bold,
        endpoint_label(&summary.goal),
        p.reset,
        summary.hops,
        summary.algorithm
    );

    let last = summary.steps.len().saturating_sub(1);
    for step in &summary.steps {
        let (tag, color) = step_tag(step, step.index == last, p);
        let _ = write!(out, " {color}{tag}{} {}", p.reset, step.identifier);
        if step.index > 0 {
            let _ = write!(out, " {}+{}{}", p.gray, format_pixels(step.leg_distance), p.reset);
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "\nTotal distance: {}", format_pixels(summary.total_distance));

    if !summary.directions.is_empty() {
        let _ = writeln!(out, "\nDirections:");
        for (index, line) in summary.directions.iter().enumerate() {
            let _ = writeln!(out, "{}{:>3}.{} {line}", p.green, index + 1, p.reset);
        }
    }
    out
}

fn step_tag(step: &RouteStep, is_last: bool, p: &ColorPalette) -> (&'static str, &'static str) {
    if step.index == 0 {
        ("STRT", p.tag_start)
    } else if is_last {
        ("GOAL", p.tag_goal)
    } else if step.kind == NodeKind::Gate {
        ("GATE", p.tag_gate)
    } else {
        ("WALK", p.tag_walk)
    }
}

fn endpoint_label(endpoint: &RouteEndpoint) -> String {
    if endpoint.location == endpoint.building {
        endpoint.location.clone()
    } else {
        format!("{} ({})", endpoint.location, endpoint.building)
    }
}
