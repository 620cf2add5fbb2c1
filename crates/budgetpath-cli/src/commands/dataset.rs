//! Dataset command handler reporting the resolved dataset and its size.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use budgetpath_lib::{load_dataset, resolve_dataset_dir};

use crate::output::OutputFormat;

/// Summary of a loaded dataset.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DatasetReport {
    pub path: String,
    pub nodes: usize,
    pub edges: usize,
    pub energy_costs: bool,
    pub coordinates: bool,
}

impl DatasetReport {
    fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(format!(
                "Dataset: {}\nNodes: {}\nEdges: {}\nEnergy costs: {}\nCoordinates: {}\n",
                self.path,
                self.nodes,
                self.edges,
                yes_no(self.energy_costs),
                yes_no(self.coordinates)
            )),
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(self)
                    .context("failed to serialize dataset report")?;
                json.push('\n');
                Ok(json)
            }
        }
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Handle the dataset subcommand.
pub fn handle_dataset_command<W: Write>(
    data_dir: Option<&Path>,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let dir = resolve_dataset_dir(data_dir).context("failed to resolve dataset directory")?;
    let graph = load_dataset(&dir)
        .with_context(|| format!("failed to load dataset from {}", dir.display()))?;

    let report = DatasetReport {
        path: dir.display().to_string(),
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        energy_costs: graph.has_energy_costs(),
        coordinates: graph.has_positions(),
    };
    out.write_all(report.render(format)?.as_bytes())
        .context("failed to write dataset report")?;
    Ok(())
}
