//! Shared fixture helpers for integration tests.

use std::path::PathBuf;

use budgetpath_lib::{load_dataset, Graph};

/// Path to the fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Three-node graph with a cheap two-hop detour that costs more energy.
#[allow(dead_code)]
pub fn triangle() -> Graph {
    load_dataset(&fixtures_dir().join("triangle")).expect("triangle fixture loads")
}

/// Eleven-node sample graph; node 11 is isolated.
#[allow(dead_code)]
pub fn sample() -> Graph {
    load_dataset(&fixtures_dir().join("sample")).expect("sample fixture loads")
}
