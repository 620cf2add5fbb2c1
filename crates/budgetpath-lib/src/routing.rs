use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::warn;

use crate::error::{Error, Result};
use crate::graph::GraphProvider;
use crate::node::NodeId;
use crate::search::{SearchEngine, SearchMode, SearchOutcome, SearchStats};

/// Number of close matches offered when the start node is unknown.
const MAX_SUGGESTIONS: usize = 3;

/// Supported search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Uniform-cost search over distances only.
    #[default]
    Ucs,
    /// Uniform-cost search under an energy budget.
    Budgeted,
    /// Budgeted search guided by the coordinate heuristic.
    #[serde(rename = "a-star")]
    AStar,
}

impl RouteAlgorithm {
    /// Whether the algorithm accumulates energy and honours a budget.
    pub fn is_constrained(self) -> bool {
        !matches!(self, RouteAlgorithm::Ucs)
    }

    /// Search mode for this algorithm under `budget`.
    pub fn search_mode(self, budget: f64) -> SearchMode {
        match self {
            RouteAlgorithm::Ucs => SearchMode::Uniform,
            RouteAlgorithm::Budgeted => SearchMode::Budgeted { budget },
            RouteAlgorithm::AStar => SearchMode::Heuristic { budget },
        }
    }
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Ucs => "ucs",
            RouteAlgorithm::Budgeted => "budgeted",
            RouteAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ucs" => Ok(RouteAlgorithm::Ucs),
            "budgeted" => Ok(RouteAlgorithm::Budgeted),
            "a-star" | "astar" | "a_star" => Ok(RouteAlgorithm::AStar),
            other => Err(format!("unknown algorithm {other:?}")),
        }
    }
}

/// High-level route request using raw, not yet validated identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    pub algorithm: RouteAlgorithm,
    /// Energy budget for constrained algorithms; `None` means unlimited.
    pub budget: Option<f64>,
}

impl RouteRequest {
    /// Uniform-cost request without an energy budget.
    pub fn ucs(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            algorithm: RouteAlgorithm::Ucs,
            budget: None,
        }
    }

    /// Energy-budgeted uniform-cost request.
    pub fn budgeted(start: impl Into<String>, goal: impl Into<String>, budget: f64) -> Self {
        Self {
            algorithm: RouteAlgorithm::Budgeted,
            budget: Some(budget),
            ..Self::ucs(start, goal)
        }
    }

    /// Energy-budgeted heuristic request.
    pub fn a_star(start: impl Into<String>, goal: impl Into<String>, budget: f64) -> Self {
        Self {
            algorithm: RouteAlgorithm::AStar,
            budget: Some(budget),
            ..Self::ucs(start, goal)
        }
    }

    fn effective_budget(&self) -> f64 {
        self.budget.unwrap_or(f64::INFINITY)
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub start: NodeId,
    pub goal: NodeId,
    pub steps: Vec<NodeId>,
    pub distance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    pub stats: SearchStats,
}

impl RoutePlan {
    /// Number of edges in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Result of route planning; infeasibility is a regular outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Found(RoutePlan),
    NotViable { stats: SearchStats },
}

impl RouteOutcome {
    pub fn plan(&self) -> Option<&RoutePlan> {
        match self {
            RouteOutcome::Found(plan) => Some(plan),
            RouteOutcome::NotViable { .. } => None,
        }
    }

    pub fn is_viable(&self) -> bool {
        matches!(self, RouteOutcome::Found(_))
    }
}

/// Validate a request and run the matching search over `graph`.
///
/// Identifier and budget validation happen before any search starts. An
/// unknown start node is reported with close matches; an unknown goal is
/// simply unreachable.
pub fn plan_route<G: GraphProvider + ?Sized>(
    graph: &G,
    request: &RouteRequest,
) -> Result<RouteOutcome> {
    let start = NodeId::new(request.start.as_str())?;
    let goal = NodeId::new(request.goal.as_str())?;

    if !request.algorithm.is_constrained() && request.budget.is_some() {
        warn!(algorithm = %request.algorithm, "energy budget ignored by unconstrained search");
    }
    let engine = SearchEngine::new(
        graph,
        request.algorithm.search_mode(request.effective_budget()),
    )?;

    if !graph.contains(&start) {
        return Err(Error::UnknownNode {
            suggestions: similar_node_ids(graph, start.as_str(), MAX_SUGGESTIONS),
            id: start.to_string(),
        });
    }

    let report = engine.run(&start, &goal)?;
    Ok(match report.outcome {
        SearchOutcome::Found(found) => RouteOutcome::Found(RoutePlan {
            algorithm: request.algorithm,
            start,
            goal,
            steps: found.path,
            distance: found.distance,
            energy: found.energy,
            stats: report.stats,
        }),
        SearchOutcome::NotViable => RouteOutcome::NotViable {
            stats: report.stats,
        },
    })
}

/// Node identifiers within a small edit distance of `query`, closest first.
pub fn similar_node_ids<G: GraphProvider + ?Sized>(
    graph: &G,
    query: &str,
    limit: usize,
) -> Vec<String> {
    let threshold = 1 + query.len() / 4;
    let mut candidates: Vec<(usize, &NodeId)> = graph
        .node_ids()
        .into_iter()
        .map(|id| (strsim::damerau_levenshtein(query, id.as_str()), id))
        .filter(|(distance, _)| *distance <= threshold)
        .collect();
    candidates.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    candidates
        .into_iter()
        .take(limit)
        .map(|(_, id)| id.to_string())
        .collect()
}
