use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the budgetpath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Lookup table an edge weight was requested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeTable {
    Distance,
    Energy,
}

impl std::fmt::Display for EdgeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            EdgeTable::Distance => "distance",
            EdgeTable::Energy => "energy",
        };
        f.write_str(value)
    }
}

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a node identifier is empty or not an integer.
    #[error("invalid node id {value:?}: {reason}")]
    InvalidNodeId { value: String, reason: &'static str },

    /// Raised when an energy budget is negative or not a number.
    #[error("invalid energy budget {value}; expected a non-negative number")]
    InvalidBudget { value: f64 },

    /// Raised when the start node is not part of the graph.
    #[error("unknown node: {id}{}", format_suggestions(.suggestions))]
    UnknownNode { id: String, suggestions: Vec<String> },

    /// Raised when a node reached during expansion has no adjacency entry.
    #[error("no adjacency entry for node {node}")]
    MissingAdjacency { node: String },

    /// Raised when an edge reached during expansion has no weight entry.
    #[error("no {table} entry for edge {from},{to}")]
    MissingEdge {
        from: String,
        to: String,
        table: EdgeTable,
    },

    /// Raised when heuristic search needs coordinates a node does not have.
    #[error("no coordinates for node {node}")]
    MissingPosition { node: String },

    /// Raised when the predecessor chain of a goal cannot be walked back to the origin.
    #[error("predecessor chain broken at node {node}")]
    BrokenPath { node: String },

    /// Dataset could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// No platform data directory could be resolved for the default dataset location.
    #[error("failed to resolve a data directory for the dataset")]
    DataDirUnavailable,

    /// Raised when a dataset file parses but its content is unusable.
    #[error("invalid dataset file {file}: {message}")]
    InvalidDataset { file: PathBuf, message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error stems from bad user input rather than bad graph data.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidNodeId { .. } | Error::InvalidBudget { .. } | Error::UnknownNode { .. }
        )
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
