use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use campusnav_cli::commands::nodes::{handle_nodes_command, NodeKindArg};
use campusnav_cli::commands::route::{handle_route_command, AlgorithmArg, RouteCommandArgs};
use campusnav_cli::commands::suggest::handle_suggest_command;
use campusnav_cli::commands::validate::handle_validate_command;
use campusnav_cli::output::OutputFormat;
use campusnav_cli::terminal::ColorPalette;

#[derive(Parser, Debug)]
#[command(author, version, about = "Campus directions and pathfinding")]
struct Cli {
    /// Directory holding campus graph and location files (overrides CAMPUSNAV_DATA_DIR).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable ANSI colors in text output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a walking route between two locations.
    Route {
        /// Starting room, floor, building or gate. Defaults to the main gate.
        #[arg(long = "from", default_value = "")]
        from: String,
        /// Destination room, floor, building or gate.
        #[arg(long = "to")]
        to: String,
        /// Search algorithm.
        #[arg(long, value_enum, default_value_t = AlgorithmArg::Dijkstra)]
        algorithm: AlgorithmArg,
    },
    /// List campus graph nodes.
    Nodes {
        /// Only list nodes of this kind.
        #[arg(long, value_enum)]
        kind: Option<NodeKindArg>,
    },
    /// Load and validate the campus data.
    Validate,
    /// Complete a partial location name.
    Suggest {
        /// Partial or misspelled location name.
        prefix: String,
        /// Maximum number of names to print.
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let data_dir = cli.data_dir.as_deref();
    let palette = ColorPalette::for_flags(cli.no_color);

    match cli.command {
        Command::Route {
            from,
            to,
            algorithm,
        } => handle_route_command(
            data_dir,
            cli.format,
            &palette,
            &RouteCommandArgs {
                from,
                to,
                algorithm,
            },
        ),
        Command::Nodes { kind } => handle_nodes_command(data_dir, cli.format, &palette, kind),
        Command::Validate => handle_validate_command(data_dir, cli.format, &palette),
        Command::Suggest { prefix, limit } => {
            handle_suggest_command(data_dir, cli.format, &palette, &prefix, limit)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
