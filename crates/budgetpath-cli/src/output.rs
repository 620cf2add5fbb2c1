//! Output formatting for route summaries.

use anyhow::{Context, Result};
use clap::ValueEnum;

use budgetpath_lib::RouteSummary;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Classic text report (`Shortest Path: 1 -> 2`).
    #[default]
    Text,
    /// Pretty-printed JSON summary.
    Json,
}

impl OutputFormat {
    /// Render a route summary in this format, newline terminated.
    pub fn render_route(self, summary: &RouteSummary) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(summary.render_text()),
            OutputFormat::Json => {
                let mut json = summary
                    .to_json()
                    .context("failed to serialize route summary")?;
                json.push('\n');
                Ok(json)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use budgetpath_lib::{plan_route, Graph, RouteRequest};

    fn summary() -> RouteSummary {
        let graph = Graph::builder()
            .edge("1", "2", 4.0)
            .edge("1", "3", 1.0)
            .edge("3", "2", 1.0)
            .build()
            .unwrap();
        let request = RouteRequest::ucs("1", "2");
        let outcome = plan_route(&graph, &request).unwrap();
        RouteSummary::from_outcome(&request, &outcome)
    }

    #[test]
    fn text_format_uses_report_layout() {
        let rendered = OutputFormat::Text.render_route(&summary()).unwrap();
        assert_eq!(rendered, "Shortest Path: 1 -> 3 -> 2\nShortest Distance: 2\n");
    }

    #[test]
    fn json_format_is_parseable() {
        let rendered = OutputFormat::Json.render_route(&summary()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["steps"], serde_json::json!(["1", "3", "2"]));
        assert_eq!(value["algorithm"], "ucs");
    }
}
