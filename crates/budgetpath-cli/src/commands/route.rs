//! Route command handler for computing least-cost paths between nodes.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use budgetpath_lib::{
    load_dataset, plan_route, resolve_dataset_dir, GraphProvider, RouteAlgorithm, RouteRequest,
    RouteSummary,
};

use crate::output::OutputFormat;
use crate::prompt::{prompt_budget, prompt_line};

/// Algorithm selected with `--algorithm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AlgorithmArg {
    /// Uniform-cost search over distances.
    #[default]
    Ucs,
    /// Uniform-cost search under an energy budget.
    Budgeted,
    /// Budgeted search guided by node coordinates.
    #[value(name = "a-star")]
    AStar,
}

impl From<AlgorithmArg> for RouteAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Ucs => RouteAlgorithm::Ucs,
            AlgorithmArg::Budgeted => RouteAlgorithm::Budgeted,
            AlgorithmArg::AStar => RouteAlgorithm::AStar,
        }
    }
}

/// Arguments for the route command.
#[derive(Debug, Clone, Args)]
pub struct RouteCommandArgs {
    /// Start node id; prompted for when omitted.
    #[arg(long = "from")]
    pub from: Option<String>,
    /// Goal node id; prompted for when omitted.
    #[arg(long = "to")]
    pub to: Option<String>,
    /// Search algorithm.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Ucs)]
    pub algorithm: AlgorithmArg,
    /// Energy budget for constrained algorithms; prompted for when omitted.
    #[arg(long, allow_negative_numbers = true)]
    pub budget: Option<f64>,
}

impl RouteCommandArgs {
    /// Build a library request, prompting on `input` for anything missing.
    ///
    /// Prompts are written to `prompts` so they never mix with the report.
    pub fn to_request<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        prompts: &mut W,
    ) -> Result<RouteRequest> {
        let algorithm = RouteAlgorithm::from(self.algorithm);
        let start = match &self.from {
            Some(value) => value.clone(),
            None => prompt_line(input, prompts, "Start Node: ")?,
        };
        let goal = match &self.to {
            Some(value) => value.clone(),
            None => prompt_line(input, prompts, "End Node: ")?,
        };
        let budget = match (self.budget, algorithm.is_constrained()) {
            (Some(budget), _) => Some(budget),
            (None, true) => Some(prompt_budget(input, prompts)?),
            (None, false) => None,
        };

        Ok(RouteRequest {
            start,
            goal,
            algorithm,
            budget,
        })
    }
}

/// Handle the route subcommand.
///
/// Loads the dataset, runs the search and writes the report to `out`. An
/// infeasible route is a normal result, not an error.
pub fn handle_route_command<R: BufRead, W: Write, P: Write>(
    data_dir: Option<&Path>,
    format: OutputFormat,
    args: &RouteCommandArgs,
    input: &mut R,
    prompts: &mut P,
    out: &mut W,
) -> Result<()> {
    let dir = resolve_dataset_dir(data_dir).context("failed to resolve dataset directory")?;
    let graph = load_dataset(&dir)
        .with_context(|| format!("failed to load dataset from {}", dir.display()))?;

    let request = args.to_request(input, prompts)?;
    let summary = run_route(&graph, &request)?;
    out.write_all(format.render_route(&summary)?.as_bytes())
        .context("failed to write route report")?;
    Ok(())
}

/// Plan a route and summarise the outcome.
pub fn run_route<G: GraphProvider + ?Sized>(
    graph: &G,
    request: &RouteRequest,
) -> Result<RouteSummary> {
    let outcome = plan_route(graph, request).with_context(|| {
        format!(
            "failed to plan {} route from {:?} to {:?}",
            request.algorithm, request.start, request.goal
        )
    })?;
    if !outcome.is_viable() {
        tracing::info!(start = %request.start, goal = %request.goal, "no viable path");
    }
    Ok(RouteSummary::from_outcome(request, &outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn args(algorithm: AlgorithmArg) -> RouteCommandArgs {
        RouteCommandArgs {
            from: None,
            to: None,
            algorithm,
            budget: None,
        }
    }

    #[test]
    fn prompts_for_missing_values_in_order() {
        let mut input = Cursor::new("1\n50\n7.5\n");
        let mut prompts = Vec::new();

        let request = args(AlgorithmArg::Budgeted)
            .to_request(&mut input, &mut prompts)
            .unwrap();
        assert_eq!(request, RouteRequest::budgeted("1", "50", 7.5));
        assert_eq!(
            String::from_utf8(prompts).unwrap(),
            "Start Node: End Node: Enter Energy budget: "
        );
    }

    #[test]
    fn ucs_does_not_prompt_for_budget() {
        let mut input = Cursor::new("");
        let mut prompts = Vec::new();
        let request = RouteCommandArgs {
            from: Some("3".to_string()),
            to: Some("4".to_string()),
            ..args(AlgorithmArg::Ucs)
        }
        .to_request(&mut input, &mut prompts)
        .unwrap();

        assert_eq!(request, RouteRequest::ucs("3", "4"));
        assert!(prompts.is_empty());
    }

    #[test]
    fn algorithm_arg_maps_to_library_algorithm() {
        assert_eq!(RouteAlgorithm::from(AlgorithmArg::AStar), RouteAlgorithm::AStar);
        assert_eq!(
            AlgorithmArg::from_str("a-star", true).unwrap(),
            AlgorithmArg::AStar
        );
    }
}
