//! budgetpath library entry points.
//!
//! This crate loads a static weighted graph, runs least-cost searches over it
//! (uniform-cost, energy-budgeted, and heuristic-guided budgeted search) and
//! reconstructs the resulting routes. Higher-level consumers (the CLI) should
//! only depend on the functions exported here instead of reimplementing
//! behavior.
//!

#![deny(warnings)]

pub mod dataset;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod node;
pub mod output;
pub mod path;
pub mod routing;
pub mod search;

pub use dataset::{default_dataset_dir, load_dataset, resolve_dataset_dir};
pub use error::{EdgeTable, Error, Result};
pub use frontier::{Frontier, NodeHandle};
pub use graph::{Graph, GraphBuilder, GraphProvider};
pub use node::{heuristic_score, NodeId, NodeState, Position};
pub use output::{format_path, RouteSummary, NOT_VIABLE_MESSAGE};
pub use path::{reconstruct_path, Predecessors};
pub use routing::{plan_route, RouteAlgorithm, RouteOutcome, RoutePlan, RouteRequest};
pub use search::{FoundPath, SearchEngine, SearchMode, SearchOutcome, SearchReport, SearchStats};
