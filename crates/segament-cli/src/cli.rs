//! CLI argument definitions for segament.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "segament")]
#[command(about = "CHUNITHM chart dataset builder", version)]
pub struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Settings for the update run (flags override environment variables).
#[derive(ClapArgs, Debug, Clone)]
pub struct SourceArgs {
    /// chunirec access token
    #[arg(long, env = "CHUNIREC_ACCESS_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// chunirec user name
    #[arg(long, env = "CHUNIREC_USER_NAME", global = true)]
    pub user_name: Option<String>,

    /// Google API key for the Sheets API
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Spreadsheet id holding the chart constants
    #[arg(long, env = "GOOGLE_SHEET_ID", global = true)]
    pub sheet_id: Option<String>,

    /// chunirec region parameter
    #[arg(long, default_value = "jp2", global = true)]
    pub region: String,

    /// Sheet layout override (TOML)
    #[arg(long, value_name = "FILE", global = true)]
    pub layout: Option<PathBuf>,

    /// Dataset output path
    #[arg(short, long, default_value = "data/chunithm-music.json", global = true)]
    pub output: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch, merge and write the dataset (default)
    Update,
    /// Apply level-derived constants to an existing dataset
    Backfill {
        /// Dataset to read
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Print dataset counts and check its invariants
    Inspect {
        /// Dataset to read
        #[arg(short, long)]
        input: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
