use std::fmt::Write;

use serde::Serialize;

use crate::node::NodeId;
use crate::routing::{RouteAlgorithm, RouteOutcome, RouteRequest};
use crate::search::SearchStats;

/// Message printed when no route satisfies the constraints.
pub const NOT_VIABLE_MESSAGE: &str = "Path not viable";

/// Structured representation of a route outcome that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub viable: bool,
    pub start: String,
    pub goal: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hops: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    pub stats: SearchStats,
}

impl RouteSummary {
    pub fn from_outcome(request: &RouteRequest, outcome: &RouteOutcome) -> Self {
        let budget = request
            .budget
            .filter(|_| request.algorithm.is_constrained());
        match outcome {
            RouteOutcome::Found(plan) => Self {
                algorithm: plan.algorithm,
                viable: true,
                start: plan.start.to_string(),
                goal: plan.goal.to_string(),
                budget,
                steps: plan.steps.clone(),
                hops: Some(plan.hop_count()),
                distance: Some(plan.distance),
                energy: plan.energy,
                stats: plan.stats,
            },
            RouteOutcome::NotViable { stats } => Self {
                algorithm: request.algorithm,
                viable: false,
                start: request.start.clone(),
                goal: request.goal.clone(),
                budget,
                steps: Vec::new(),
                hops: None,
                distance: None,
                energy: None,
                stats: *stats,
            },
        }
    }

    /// Render the summary in the plain text report format.
    ///
    /// Unconstrained routes report `Shortest Distance`; constrained routes
    /// report `Distance` and `Energy` on separate lines.
    pub fn render_text(&self) -> String {
        let mut buffer = String::new();
        let Some(distance) = self.distance.filter(|_| self.viable) else {
            let _ = writeln!(buffer, "{NOT_VIABLE_MESSAGE}");
            return buffer;
        };

        let _ = writeln!(buffer, "Shortest Path: {}", format_path(&self.steps));
        match self.energy {
            Some(energy) => {
                let _ = writeln!(buffer, "Distance: {distance}");
                let _ = writeln!(buffer, "Energy: {energy}");
            }
            None => {
                let _ = writeln!(buffer, "Shortest Distance: {distance}");
            }
        }
        buffer
    }

    /// Render the summary as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Join a route as `id -> id -> ... -> id`.
pub fn format_path(steps: &[NodeId]) -> String {
    steps
        .iter()
        .map(NodeId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}
