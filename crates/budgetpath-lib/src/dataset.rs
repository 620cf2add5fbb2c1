use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::graph::{EdgeWeights, Graph};
use crate::node::{NodeId, Position};

/// Adjacency lists: `{ "<id>": ["<id>", ...] }`.
pub const ADJACENCY_FILE: &str = "G.json";
/// Distance weights: `{ "<from>,<to>": number }`.
pub const DISTANCE_FILE: &str = "Dist.json";
/// Energy weights, same layout as [`DISTANCE_FILE`].
pub const ENERGY_FILE: &str = "Cost.json";
/// Coordinates: `{ "<id>": [x, y] }`.
pub const POSITION_FILE: &str = "Coord.json";

/// Environment variable overriding the dataset directory.
pub const DATA_DIR_ENV: &str = "BUDGETPATH_DATA_DIR";

/// Resolve the default dataset location using platform-specific project directories.
pub fn default_dataset_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("org", "budgetpath", "budgetpath").ok_or(Error::DataDirUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Resolve the dataset directory: an explicit path wins, then
/// [`DATA_DIR_ENV`], then the platform data directory.
pub fn resolve_dataset_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "using explicit dataset directory");
        return Ok(path.to_path_buf());
    }
    if let Some(value) = env::var_os(DATA_DIR_ENV).filter(|value| !value.is_empty()) {
        let path = PathBuf::from(value);
        debug!(path = %path.display(), "using dataset directory from {}", DATA_DIR_ENV);
        return Ok(path);
    }
    default_dataset_dir()
}

/// Load the four lookup tables from `dir` into an in-memory [`Graph`].
///
/// The adjacency and distance tables are required. The energy and coordinate
/// tables are optional; without them constrained and heuristic searches fail
/// with lookup errors on first use.
pub fn load_dataset(dir: &Path) -> Result<Graph> {
    if !dir.is_dir() {
        return Err(Error::DatasetNotFound {
            path: dir.to_path_buf(),
        });
    }

    let adjacency: HashMap<NodeId, Vec<NodeId>> = read_table(&dir.join(ADJACENCY_FILE))?;
    let distances = read_edge_table(&dir.join(DISTANCE_FILE))?;

    let energy_path = dir.join(ENERGY_FILE);
    let energy = if energy_path.exists() {
        read_edge_table(&energy_path)?
    } else {
        debug!(path = %energy_path.display(), "energy table absent");
        EdgeWeights::new()
    };

    let position_path = dir.join(POSITION_FILE);
    let positions: HashMap<NodeId, Position> = if position_path.exists() {
        read_table(&position_path)?
    } else {
        debug!(path = %position_path.display(), "coordinate table absent");
        HashMap::new()
    };

    let graph = Graph::from_parts(adjacency, distances, energy, positions);
    info!(
        path = %dir.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded dataset"
    );
    Ok(graph)
}

fn read_file(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(fs::read_to_string(path)?)
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = read_file(path)?;
    serde_json::from_str(&contents).map_err(|err| Error::InvalidDataset {
        file: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn read_edge_table(path: &Path) -> Result<EdgeWeights> {
    let raw: HashMap<String, f64> = read_table(path)?;
    let mut weights = EdgeWeights::new();
    let mut negative = 0usize;

    for (key, weight) in raw {
        let (from, to) = parse_edge_key(&key).map_err(|message| Error::InvalidDataset {
            file: path.to_path_buf(),
            message,
        })?;
        if weight < 0.0 {
            negative += 1;
        }
        weights.entry(from).or_default().insert(to, weight);
    }

    if negative > 0 {
        warn!(
            path = %path.display(),
            count = negative,
            "edge table contains negative weights; least-cost results are not guaranteed"
        );
    }
    Ok(weights)
}

/// Split an `"<from>,<to>"` edge key into validated identifiers.
pub fn parse_edge_key(key: &str) -> std::result::Result<(NodeId, NodeId), String> {
    let Some((from, to)) = key.split_once(',') else {
        return Err(format!("edge key {key:?} is not of the form \"from,to\""));
    };
    let from = NodeId::new(from).map_err(|err| format!("edge key {key:?}: {err}"))?;
    let to = NodeId::new(to).map_err(|err| format!("edge key {key:?}: {err}"))?;
    Ok((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphProvider;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).expect("write table");
    }

    fn id(value: &str) -> NodeId {
        NodeId::new(value).unwrap()
    }

    #[test]
    fn parses_edge_keys() {
        let (from, to) = parse_edge_key("12,7").unwrap();
        assert_eq!((from, to), (id("12"), id("7")));
        assert!(parse_edge_key("12").is_err());
        assert!(parse_edge_key("12,x").is_err());
        assert!(parse_edge_key(",7").is_err());
    }

    #[test]
    fn loads_required_and_optional_tables() {
        let dir = tempdir().unwrap();
        write(dir.path(), ADJACENCY_FILE, r#"{"1": ["2"], "2": ["1"]}"#);
        write(dir.path(), DISTANCE_FILE, r#"{"1,2": 3, "2,1": 3.5}"#);
        write(dir.path(), ENERGY_FILE, r#"{"1,2": 1, "2,1": 2}"#);
        write(dir.path(), POSITION_FILE, r#"{"1": [0, 0], "2": [3, 4]}"#);

        let graph = load_dataset(dir.path()).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.distance(&id("2"), &id("1")).unwrap(), 3.5);
        assert_eq!(graph.energy_cost(&id("1"), &id("2")).unwrap(), 1.0);
        assert_eq!(graph.position(&id("2")).unwrap(), Position::new(3.0, 4.0));
    }

    #[test]
    fn optional_tables_may_be_absent() {
        let dir = tempdir().unwrap();
        write(dir.path(), ADJACENCY_FILE, r#"{"1": []}"#);
        write(dir.path(), DISTANCE_FILE, r#"{}"#);

        let graph = load_dataset(dir.path()).unwrap();
        assert!(!graph.has_energy_costs());
        assert!(!graph.has_positions());
    }

    #[test]
    fn missing_required_table_is_not_found() {
        let dir = tempdir().unwrap();
        write(dir.path(), ADJACENCY_FILE, r#"{"1": []}"#);

        let error = load_dataset(dir.path()).unwrap_err();
        assert!(matches!(error, Error::DatasetNotFound { path } if path.ends_with(DISTANCE_FILE)));
    }

    #[test]
    fn missing_directory_is_not_found() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            load_dataset(&missing),
            Err(Error::DatasetNotFound { .. })
        ));
    }

    #[test]
    fn invalid_identifiers_are_rejected_with_file_context() {
        let dir = tempdir().unwrap();
        write(dir.path(), ADJACENCY_FILE, r#"{"a": ["1"]}"#);
        write(dir.path(), DISTANCE_FILE, r#"{}"#);

        let error = load_dataset(dir.path()).unwrap_err();
        assert!(matches!(error, Error::InvalidDataset { file, .. } if file.ends_with(ADJACENCY_FILE)));
    }

    #[test]
    fn malformed_edge_key_is_rejected() {
        let dir = tempdir().unwrap();
        write(dir.path(), ADJACENCY_FILE, r#"{"1": ["2"]}"#);
        write(dir.path(), DISTANCE_FILE, r#"{"1;2": 1}"#);

        let error = load_dataset(dir.path()).unwrap_err();
        assert!(error.to_string().contains("from,to"));
    }

    #[test]
    fn explicit_dataset_dir_wins() {
        let dir = tempdir().unwrap();
        assert_eq!(resolve_dataset_dir(Some(dir.path())).unwrap(), dir.path());
    }
}
