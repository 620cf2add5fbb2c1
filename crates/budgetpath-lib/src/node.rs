//! Node identifiers and the per-node search state.
//!
//! A [`NodeState`] carries the best known costs for one graph node during a
//! single search run. Identity is carried solely by its [`NodeId`]; the search
//! engine keeps exactly one state per identifier in its registry so every
//! frontier entry referring to a node observes the same mutable costs.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Weight applied to the energy/distance ratio term of the heuristic.
const ENERGY_RATIO_WEIGHT: f64 = 0.4;
/// Weight applied to the straight-line distance term of the heuristic.
const STRAIGHT_LINE_WEIGHT: f64 = 2.0;

/// Validated node identifier.
///
/// Identifiers are kept in their textual form (they key the dataset tables)
/// but must parse as an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(String);

impl NodeId {
    /// Validate and wrap a node identifier.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(Error::InvalidNodeId {
                value,
                reason: "identifier is empty",
            });
        }
        if value.parse::<i64>().is_err() {
            return Err(Error::InvalidNodeId {
                value,
                reason: "identifier is not a valid integer",
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NodeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for NodeId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NodeId {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Planar coordinates for a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate the Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<[f64; 2]> for Position {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Position> for [f64; 2] {
    fn from(position: Position) -> Self {
        [position.x, position.y]
    }
}

/// Heuristic score for a node given its costs and its straight-line distance
/// to the destination.
///
/// The score is `+inf` while the distance is zero (the origin), which keeps
/// the energy/distance ratio defined.
pub fn heuristic_score(distance: f64, energy: f64, straight_line: f64) -> f64 {
    if distance == 0.0 {
        return f64::INFINITY;
    }
    energy
        + distance
        + ENERGY_RATIO_WEIGHT * (energy / distance) * straight_line
        + STRAIGHT_LINE_WEIGHT * straight_line
}

/// Mutable search state for a single node.
#[derive(Debug, Clone)]
pub struct NodeState {
    id: NodeId,
    distance: f64,
    energy: f64,
    budget: f64,
    /// Straight-line distance to the destination, present in heuristic mode.
    straight_line: Option<f64>,
    score: f64,
    visited: bool,
}

impl NodeState {
    /// Fresh state with unknown costs under the given energy budget.
    pub fn new(id: NodeId, budget: f64) -> Self {
        Self {
            id,
            distance: f64::INFINITY,
            energy: f64::INFINITY,
            budget,
            straight_line: None,
            score: f64::INFINITY,
            visited: false,
        }
    }

    /// Guide this state toward `destination`, switching its ordering key to
    /// the heuristic score.
    pub fn with_heuristic(mut self, position: Position, destination: Position) -> Self {
        self.straight_line = Some(position.distance_to(&destination));
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Key the frontier orders this state by.
    pub fn priority(&self) -> f64 {
        if self.straight_line.is_some() {
            self.score
        } else {
            self.distance
        }
    }

    /// Initialise this state as the search origin: zero distance and energy.
    pub fn seed_origin(&mut self) {
        self.distance = 0.0;
        self.energy = 0.0;
        if let Some(straight_line) = self.straight_line {
            self.score = heuristic_score(0.0, 0.0, straight_line);
        }
    }

    /// Propose new costs reached through some neighbour.
    ///
    /// Accepted only when the distance strictly improves, the energy does not
    /// regress and the energy stays within budget. This is a joint dominance
    /// check rather than a Pareto update: a candidate that trades a slightly
    /// longer distance for much less energy is rejected.
    pub fn relax(&mut self, distance: f64, energy: f64) -> bool {
        let accepted = energy <= self.energy && distance < self.distance && energy <= self.budget;
        if accepted {
            self.distance = distance;
            self.energy = energy;
            if let Some(straight_line) = self.straight_line {
                self.score = heuristic_score(distance, energy, straight_line);
            }
        }
        accepted
    }

    pub fn mark_visited(&mut self) {
        self.visited = true;
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }
}

impl PartialEq for NodeState {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for NodeState {}
