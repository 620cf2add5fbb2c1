use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use budgetpath_cli::commands::dataset::handle_dataset_command;
use budgetpath_cli::commands::route::{handle_route_command, RouteCommandArgs};
use budgetpath_cli::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Least-cost route search with optional energy budgets")]
struct Cli {
    /// Dataset directory holding G.json, Dist.json, Cost.json and Coord.json.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a least-cost route between two node ids.
    Route(RouteCommandArgs),
    /// Report the resolved dataset location and table sizes.
    Dataset,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let data_dir = cli.data_dir.as_deref();
    let mut stdout = io::stdout().lock();

    match &cli.command {
        Command::Route(args) => handle_route_command(
            data_dir,
            cli.format,
            args,
            &mut io::stdin().lock(),
            &mut io::stderr(),
            &mut stdout,
        ),
        Command::Dataset => handle_dataset_command(data_dir, cli.format, &mut stdout),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
