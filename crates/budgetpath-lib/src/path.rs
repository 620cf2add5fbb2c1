use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::node::NodeId;

/// Predecessor links recorded during a search; `None` marks the origin.
pub type Predecessors = HashMap<NodeId, Option<NodeId>>;

/// Walk the predecessor links back from `goal` and return the route in
/// origin-to-goal order.
///
/// Links are trusted to follow graph edges. A missing link, or a chain longer
/// than the map itself (a cycle), is reported as [`Error::BrokenPath`].
pub fn reconstruct_path(predecessors: &Predecessors, goal: &NodeId) -> Result<Vec<NodeId>> {
    let mut path = vec![goal.clone()];
    let mut current = goal;

    loop {
        let Some(link) = predecessors.get(current) else {
            return Err(Error::BrokenPath {
                node: current.to_string(),
            });
        };
        let Some(previous) = link else {
            break;
        };
        if path.len() > predecessors.len() {
            return Err(Error::BrokenPath {
                node: previous.to_string(),
            });
        }
        path.push(previous.clone());
        current = previous;
    }

    path.reverse();
    Ok(path)
}
