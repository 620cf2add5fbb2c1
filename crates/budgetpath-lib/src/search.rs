//! Frontier-driven least-cost search.
//!
//! One [`SearchEngine`] covers the three supported modes:
//! - [`SearchMode::Uniform`]: uniform-cost search over the distance weights.
//! - [`SearchMode::Budgeted`]: uniform-cost search that also accumulates the
//!   energy weights and rejects states above the energy budget.
//! - [`SearchMode::Heuristic`]: the budgeted search ordered by a heuristic
//!   score that uses node coordinates and the goal's position.
//!
//! Relaxation follows [`NodeState::relax`]. Frontier entries are never
//! updated in place; improved nodes are pushed again and stale entries are
//! discarded when popped.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::frontier::{Frontier, NodeHandle};
use crate::graph::GraphProvider;
use crate::node::{NodeId, NodeState, Position};
use crate::path::{reconstruct_path, Predecessors};

/// Search variant and its energy budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchMode {
    Uniform,
    Budgeted { budget: f64 },
    Heuristic { budget: f64 },
}

impl SearchMode {
    /// Energy ceiling applied to every node state (`+inf` for uniform search).
    pub fn budget(self) -> f64 {
        match self {
            SearchMode::Uniform => f64::INFINITY,
            SearchMode::Budgeted { budget } | SearchMode::Heuristic { budget } => budget,
        }
    }

    /// Whether energy weights are looked up and accumulated.
    pub fn tracks_energy(self) -> bool {
        !matches!(self, SearchMode::Uniform)
    }

    pub fn is_guided(self) -> bool {
        matches!(self, SearchMode::Heuristic { .. })
    }

    fn validate(self) -> Result<()> {
        let budget = self.budget();
        if budget.is_nan() || budget < 0.0 {
            return Err(Error::InvalidBudget { value: budget });
        }
        Ok(())
    }
}

/// Counters collected during one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes popped and finalized.
    pub expanded: usize,
    /// Frontier entries discarded because their node was already finalized.
    pub stale_entries: usize,
    /// Node states created in the registry.
    pub discovered: usize,
    /// Relaxations that improved a node's costs.
    pub improvements: usize,
}

/// Route found by a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundPath {
    pub path: Vec<NodeId>,
    pub distance: f64,
    /// Accumulated energy; `None` in uniform mode.
    pub energy: Option<f64>,
}

/// Result of a search run.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(FoundPath),
    /// The goal was not finalized with a predecessor within the constraints.
    NotViable,
}

/// Outcome plus the run's statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

/// Search engine bound to a graph provider and a mode.
///
/// Each call to [`SearchEngine::run`] owns a fresh registry, frontier and
/// predecessor map; the provider is only read.
#[derive(Debug)]
pub struct SearchEngine<'g, G: GraphProvider + ?Sized> {
    graph: &'g G,
    mode: SearchMode,
}

impl<'g, G: GraphProvider + ?Sized> SearchEngine<'g, G> {
    /// Bind the engine to `graph`, rejecting a negative or NaN budget.
    pub fn new(graph: &'g G, mode: SearchMode) -> Result<Self> {
        mode.validate()?;
        Ok(Self { graph, mode })
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Search from `start` to `goal`.
    ///
    /// Lookup failures for any node or edge reached during expansion abort the
    /// run with the provider's error.
    pub fn run(&self, start: &NodeId, goal: &NodeId) -> Result<SearchReport> {
        debug!(start = %start, goal = %goal, mode = ?self.mode, "starting search");

        let destination = if self.mode.is_guided() {
            Some(self.graph.position(goal)?)
        } else {
            None
        };
        let mut run = SearchRun::new(self.graph, self.mode.budget(), destination);

        let origin = run.state_for(start)?;
        run.registry[origin].seed_origin();
        run.predecessors.insert(start.clone(), None);
        run.frontier.push(origin, run.registry[origin].priority());

        let mut reached = None;
        while let Some(handle) = run.frontier.pop_min() {
            if run.registry[handle].is_visited() {
                run.stats.stale_entries += 1;
                continue;
            }
            run.registry[handle].mark_visited();
            run.stats.expanded += 1;

            if run.registry[handle].id() == goal {
                reached = Some(handle);
                break;
            }

            self.expand(&mut run, handle)?;
        }

        let outcome = match reached {
            Some(handle) if run.predecessors.contains_key(goal) => {
                let state = &run.registry[handle];
                SearchOutcome::Found(FoundPath {
                    path: reconstruct_path(&run.predecessors, goal)?,
                    distance: state.distance(),
                    energy: self.mode.tracks_energy().then(|| state.energy()),
                })
            }
            _ => SearchOutcome::NotViable,
        };

        debug!(
            expanded = run.stats.expanded,
            stale = run.stats.stale_entries,
            discovered = run.stats.discovered,
            improvements = run.stats.improvements,
            found = matches!(outcome, SearchOutcome::Found(_)),
            "search finished"
        );

        Ok(SearchReport {
            outcome,
            stats: run.stats,
        })
    }

    fn expand(&self, run: &mut SearchRun<'g, G>, handle: NodeHandle) -> Result<()> {
        let current = run.registry[handle].id().clone();
        let distance = run.registry[handle].distance();
        let energy = run.registry[handle].energy();

        for neighbour in self.graph.neighbours(&current)? {
            let next = run.state_for(neighbour)?;
            let candidate_distance = distance + self.graph.distance(&current, neighbour)?;
            let candidate_energy = if self.mode.tracks_energy() {
                energy + self.graph.energy_cost(&current, neighbour)?
            } else {
                energy
            };

            if !run.registry[next].relax(candidate_distance, candidate_energy) {
                continue;
            }
            run.stats.improvements += 1;

            // Only the direct back-edge to the node that reached `current` is
            // suppressed; the improved costs stay on the neighbour either way.
            let points_back = matches!(
                run.predecessors.get(&current),
                Some(Some(previous)) if previous == neighbour
            );
            if points_back {
                trace!(node = %neighbour, via = %current, "skipping back-edge");
                continue;
            }

            trace!(
                node = %neighbour,
                via = %current,
                distance = candidate_distance,
                energy = candidate_energy,
                "relaxed"
            );
            run.predecessors
                .insert(neighbour.clone(), Some(current.clone()));
            run.frontier.push(next, run.registry[next].priority());
        }

        Ok(())
    }
}

/// Mutable state owned by a single run.
struct SearchRun<'g, G: GraphProvider + ?Sized> {
    graph: &'g G,
    budget: f64,
    destination: Option<Position>,
    registry: Vec<NodeState>,
    index: HashMap<NodeId, NodeHandle>,
    frontier: Frontier,
    predecessors: Predecessors,
    stats: SearchStats,
}

impl<'g, G: GraphProvider + ?Sized> SearchRun<'g, G> {
    fn new(graph: &'g G, budget: f64, destination: Option<Position>) -> Self {
        Self {
            graph,
            budget,
            destination,
            registry: Vec::new(),
            index: HashMap::new(),
            frontier: Frontier::new(),
            predecessors: Predecessors::new(),
            stats: SearchStats::default(),
        }
    }

    /// Fetch the registry handle for `id`, creating its state on first sight.
    fn state_for(&mut self, id: &NodeId) -> Result<NodeHandle> {
        if let Some(&handle) = self.index.get(id) {
            return Ok(handle);
        }

        let mut state = NodeState::new(id.clone(), self.budget);
        if let Some(destination) = self.destination {
            state = state.with_heuristic(self.graph.position(id)?, destination);
        }

        let handle = self.registry.len();
        self.registry.push(state);
        self.index.insert(id.clone(), handle);
        self.stats.discovered += 1;
        Ok(handle)
    }
}
