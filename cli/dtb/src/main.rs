//! dtb: command-line converter for Brazilian territorial division datasets.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::DtbConfig;

#[derive(Parser)]
#[command(
    name = "dtb",
    version,
    about = "Convert Brazilian territorial division datasets to other formats"
)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the dataset to another format
    Export {
        /// Input JSON dataset (default: [dataset] input from dtb.toml)
        #[arg(long, short)]
        input: Option<PathBuf>,
        /// Output format (see `dtb formats`)
        #[arg(long, short)]
        format: Option<String>,
        /// Drop optional whitespace
        #[arg(long, conflicts_with = "no_minify")]
        minify: bool,
        /// Keep optional whitespace even if dtb.toml sets `minified`
        #[arg(long)]
        no_minify: bool,
        /// Output file, or `auto` for dtb.<extension> (default: stdout)
        #[arg(long, short)]
        output: Option<String>,
    },
    /// List available output formats
    Formats {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse the dataset and check referential integrity
    Check {
        /// Input JSON dataset (default: [dataset] input from dtb.toml)
        #[arg(long, short)]
        input: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Export {
            input,
            format,
            minify,
            no_minify,
            output,
        } => {
            let config = DtbConfig::find_and_load(&cwd)?;
            commands::export::run(
                config.as_ref(),
                input.as_deref(),
                format.as_deref(),
                minify_flag(minify, no_minify),
                output.as_deref(),
            )
        }

        Commands::Formats { json } => commands::formats::run(json),

        Commands::Check { input } => {
            let config = DtbConfig::find_and_load(&cwd)?;
            commands::check::run(config.as_ref(), input.as_deref())
        }
    }
}

/// `None` leaves the choice to dtb.toml.
fn minify_flag(minify: bool, no_minify: bool) -> Option<bool> {
    if minify {
        Some(true)
    } else if no_minify {
        Some(false)
    } else {
        None
    }
}
