//! CLI argument parsing tests.
//!
//! These tests verify that command-line arguments are parsed correctly
//! without actually executing the commands (which would hit the network).

#[allow(dead_code)]
#[path = "../src/cli.rs"]
mod cli;

use std::path::PathBuf;

use clap::Parser;
use cli::{Args, Command};

#[test]
fn test_parse_no_args_runs_update() {
    let args = Args::try_parse_from(["segament"]).unwrap();
    assert!(args.command.is_none());
    assert!(!args.verbose);
    assert_eq!(args.source.region, "jp2");
    assert_eq!(args.source.output, PathBuf::from("data/chunithm-music.json"));
    assert!(args.source.layout.is_none());
}

#[test]
fn test_parse_update_with_flags() {
    let args = Args::try_parse_from([
        "segament",
        "update",
        "--api-key",
        "key",
        "--sheet-id",
        "sheet",
        "--token",
        "tok",
        "--region",
        "jp",
    ])
    .unwrap();

    assert!(matches!(args.command, Some(Command::Update)));
    assert_eq!(args.source.api_key.as_deref(), Some("key"));
    assert_eq!(args.source.sheet_id.as_deref(), Some("sheet"));
    assert_eq!(args.source.token.as_deref(), Some("tok"));
    assert_eq!(args.source.region, "jp");
}

#[test]
fn test_parse_output_and_layout() {
    let args = Args::try_parse_from([
        "segament",
        "-o",
        "out/music.json",
        "--layout",
        "layout.toml",
    ])
    .unwrap();
    assert_eq!(args.source.output, PathBuf::from("out/music.json"));
    assert_eq!(args.source.layout, Some(PathBuf::from("layout.toml")));
}

#[test]
fn test_parse_backfill() {
    let args =
        Args::try_parse_from(["segament", "backfill", "-i", "music.json", "-o", "fixed.json"])
            .unwrap();
    match args.command {
        Some(Command::Backfill { input }) => {
            assert_eq!(input, PathBuf::from("music.json"));
            assert_eq!(args.source.output, PathBuf::from("fixed.json"));
        }
        _ => panic!("Expected Backfill command"),
    }
}

#[test]
fn test_parse_backfill_requires_input() {
    assert!(Args::try_parse_from(["segament", "backfill"]).is_err());
}

#[test]
fn test_parse_inspect_with_json() {
    let args =
        Args::try_parse_from(["segament", "inspect", "--input", "music.json", "--json"]).unwrap();
    match args.command {
        Some(Command::Inspect { input, json }) => {
            assert_eq!(input, PathBuf::from("music.json"));
            assert!(json);
        }
        _ => panic!("Expected Inspect command"),
    }
}

#[test]
fn test_parse_verbose_after_subcommand() {
    let args = Args::try_parse_from(["segament", "inspect", "-i", "m.json", "-v"]).unwrap();
    assert!(args.verbose);
}

#[test]
fn test_invalid_command_fails() {
    let result = Args::try_parse_from(["segament", "invalid-command"]);
    assert!(result.is_err());
}
