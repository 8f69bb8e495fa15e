mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins; otherwise info, or debug with --verbose
    let default_filter = if args.verbose {
        "segament=debug,segament_core=debug"
    } else {
        "segament=info,segament_core=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match args.command {
        None | Some(Command::Update) => commands::update::run(&args.source),
        Some(Command::Backfill { input }) => commands::backfill::run(&input, &args.source.output),
        Some(Command::Inspect { input, json }) => commands::inspect::run(&input, json),
    }
}
