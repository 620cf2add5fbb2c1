use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{EdgeTable, Error, Result};
use crate::node::{NodeId, Position};

/// Per-edge weights keyed by source then target so lookups borrow both ids.
pub type EdgeWeights = HashMap<NodeId, HashMap<NodeId, f64>>;

/// Read-only lookup service the search engine consumes.
///
/// Every lookup fails with a lookup error when the table has no entry; the
/// engine treats those failures as fatal for the run.
pub trait GraphProvider: Send + Sync {
    /// Outgoing neighbours of `node`, in stored order.
    fn neighbours(&self, node: &NodeId) -> Result<&[NodeId]>;

    /// Primary weight of the edge `from -> to`.
    fn distance(&self, from: &NodeId, to: &NodeId) -> Result<f64>;

    /// Secondary (energy) weight of the edge `from -> to`.
    fn energy_cost(&self, from: &NodeId, to: &NodeId) -> Result<f64>;

    /// Coordinates of `node`.
    fn position(&self, node: &NodeId) -> Result<Position>;

    /// Whether the adjacency table has an entry for `node`.
    fn contains(&self, node: &NodeId) -> bool;

    /// All node identifiers with an adjacency entry, in no particular order.
    fn node_ids(&self) -> Vec<&NodeId>;
}

/// In-memory graph tables.
///
/// Tables sit behind [`Arc`] so a loaded graph can be cloned cheaply and shared
/// read-only between runs.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Arc<HashMap<NodeId, Vec<NodeId>>>,
    distances: Arc<EdgeWeights>,
    energy: Arc<EdgeWeights>,
    positions: Arc<HashMap<NodeId, Position>>,
}

impl Graph {
    /// Assemble a graph from already validated tables.
    pub fn from_parts(
        adjacency: HashMap<NodeId, Vec<NodeId>>,
        distances: EdgeWeights,
        energy: EdgeWeights,
        positions: HashMap<NodeId, Position>,
    ) -> Self {
        Self {
            adjacency: Arc::new(adjacency),
            distances: Arc::new(distances),
            energy: Arc::new(energy),
            positions: Arc::new(positions),
        }
    }

    /// Start building a graph edge by edge.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    pub fn has_energy_costs(&self) -> bool {
        !self.energy.is_empty()
    }

    pub fn has_positions(&self) -> bool {
        !self.positions.is_empty()
    }
}

fn edge_weight(weights: &EdgeWeights, from: &NodeId, to: &NodeId, table: EdgeTable) -> Result<f64> {
    weights
        .get(from)
        .and_then(|targets| targets.get(to))
        .copied()
        .ok_or_else(|| Error::MissingEdge {
            from: from.to_string(),
            to: to.to_string(),
            table,
        })
}

impl GraphProvider for Graph {
    fn neighbours(&self, node: &NodeId) -> Result<&[NodeId]> {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::MissingAdjacency {
                node: node.to_string(),
            })
    }

    fn distance(&self, from: &NodeId, to: &NodeId) -> Result<f64> {
        edge_weight(&self.distances, from, to, EdgeTable::Distance)
    }

    fn energy_cost(&self, from: &NodeId, to: &NodeId) -> Result<f64> {
        edge_weight(&self.energy, from, to, EdgeTable::Energy)
    }

    fn position(&self, node: &NodeId) -> Result<Position> {
        self.positions
            .get(node)
            .copied()
            .ok_or_else(|| Error::MissingPosition {
                node: node.to_string(),
            })
    }

    fn contains(&self, node: &NodeId) -> bool {
        self.adjacency.contains_key(node)
    }

    fn node_ids(&self) -> Vec<&NodeId> {
        self.adjacency.keys().collect()
    }
}

/// Incremental [`Graph`] construction from raw identifiers.
///
/// Identifiers are validated in [`GraphBuilder::build`]; the first invalid one
/// is reported. Edge targets get an (empty) adjacency entry of their own so a
/// sink node can be expanded.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<String>,
    edges: Vec<PendingEdge>,
    positions: Vec<(String, Position)>,
}

#[derive(Debug)]
struct PendingEdge {
    from: String,
    to: String,
    distance: f64,
    energy: Option<f64>,
}

impl GraphBuilder {
    /// Register a node without edges.
    pub fn node(mut self, id: &str) -> Self {
        self.nodes.push(id.to_string());
        self
    }

    /// Add a directed edge carrying only a distance weight.
    pub fn edge(mut self, from: &str, to: &str, distance: f64) -> Self {
        self.edges.push(PendingEdge {
            from: from.to_string(),
            to: to.to_string(),
            distance,
            energy: None,
        });
        self
    }

    /// Add a directed edge carrying both a distance and an energy weight.
    pub fn edge_with_energy(mut self, from: &str, to: &str, distance: f64, energy: f64) -> Self {
        self.edges.push(PendingEdge {
            from: from.to_string(),
            to: to.to_string(),
            distance,
            energy: Some(energy),
        });
        self
    }

    pub fn position(mut self, id: &str, x: f64, y: f64) -> Self {
        self.positions.push((id.to_string(), Position::new(x, y)));
        self
    }

    pub fn build(self) -> Result<Graph> {
        let mut adjacency: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        let mut distances = EdgeWeights::new();
        let mut energy = EdgeWeights::new();
        let mut positions = HashMap::new();

        for raw in self.nodes {
            adjacency.entry(NodeId::new(raw)?).or_default();
        }

        for edge in self.edges {
            let from = NodeId::new(edge.from)?;
            let to = NodeId::new(edge.to)?;
            adjacency.entry(to.clone()).or_default();

            let targets = adjacency.entry(from.clone()).or_default();
            if !targets.contains(&to) {
                targets.push(to.clone());
            }
            distances
                .entry(from.clone())
                .or_default()
                .insert(to.clone(), edge.distance);
            if let Some(cost) = edge.energy {
                energy.entry(from).or_default().insert(to, cost);
            }
        }

        for (raw, position) in self.positions {
            positions.insert(NodeId::new(raw)?, position);
        }

        Ok(Graph::from_parts(adjacency, distances, energy, positions))
    }
}
