use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::{CampusGraph, NodeKind};
use crate::path::euclidean_distance;
use crate::resolver::Granularity;
use crate::routing::{PlannedEndpoint, RoutePlan};
use crate::RouteAlgorithm;

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    /// Location the input resolved to.
    pub location: String,
    pub granularity: Granularity,
    pub building: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

impl RouteEndpoint {
    fn from_planned(endpoint: &PlannedEndpoint) -> Self {
        Self {
            location: endpoint.location.clone(),
            granularity: endpoint.granularity,
            building: endpoint.building.clone(),
            building_label: endpoint.building_label.clone(),
            floor: endpoint.floor.clone(),
            room: endpoint.room.clone(),
        }
    }

    fn display_name(&self) -> String {
        match (&self.granularity, &self.building_label) {
            (Granularity::Building, Some(label)) => format!("{label} ({})", self.building),
            (Granularity::Room | Granularity::Floor, _) => {
                format!("{} in {}", self.location, self.building)
            }
            _ => self.location.clone(),
        }
    }
}

/// Graph node visited while walking a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub identifier: String,
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
    /// Distance from the previous step.
    pub leg_distance: f64,
    /// Distance walked so far, including this leg.
    pub cumulative_distance: f64,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub hops: usize,
    pub total_distance: f64,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub steps: Vec<RouteStep>,
    pub directions: Vec<String>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with node names, coordinates and leg distances.
    pub fn from_plan(graph: &CampusGraph, plan: &RoutePlan) -> Result<Self> {
        if plan.steps.is_empty() {
            return Err(Error::EmptyRoutePlan);
        }

        let mut steps = Vec::with_capacity(plan.steps.len());
        let mut cumulative = 0.0;
        let mut previous = None;
        for (index, &node_id) in plan.steps.iter().enumerate() {
            let node = graph.node(node_id).ok_or(Error::EmptyRoutePlan)?;
            let leg_distance = previous
                .map(|prev| euclidean_distance(prev, node))
                .unwrap_or(0.0);
            cumulative += leg_distance;
            steps.push(RouteStep {
                index,
                identifier: node.identifier().to_string(),
                kind: node.kind(),
                x: node.x(),
                y: node.y(),
                leg_distance,
                cumulative_distance: cumulative,
            });
            previous = Some(node);
        }

        Ok(Self {
            algorithm: plan.algorithm,
            hops: plan.hop_count(),
            total_distance: plan.distance,
            start: RouteEndpoint::from_planned(&plan.from),
            goal: RouteEndpoint::from_planned(&plan.to),
            steps,
            directions: plan.directions.steps().to_vec(),
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, {:.0} px, algorithm: {})",
            self.start.display_name(),
            self.goal.display_name(),
            self.hops,
            self.total_distance,
            self.algorithm
        );
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "{:>3}: {} ({}) +{:.0}",
                step.index, step.identifier, step.kind, step.leg_distance
            );
        }
        if !self.directions.is_empty() {
            let _ = writeln!(buffer, "Directions:");
            for (index, line) in self.directions.iter().enumerate() {
                let _ = writeln!(buffer, "{:>3}. {line}", index + 1);
            }
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** _{} to {}_ ({} hops, {:.0} px, algorithm: `{}`)",
            self.start.display_name(),
            self.goal.display_name(),
            self.hops,
            self.total_distance,
            self.algorithm
        );
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "* {:>2}. **{}** (`{}`, {:.0} px)",
                step.index, step.identifier, step.kind, step.cumulative_distance
            );
        }
        if !self.directions.is_empty() {
            let _ = writeln!(buffer);
            for line in &self.directions {
                let _ = writeln!(buffer, "> {line}");
            }
        }
        buffer
    }
}
