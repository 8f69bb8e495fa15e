//! Backfill command: run only the level-to-constant pass on a saved dataset.

use std::path::Path;

use anyhow::{Context, Result};
use segament_core::{backfill, load_dataset, save_dataset};

pub fn run(input: &Path, output: &Path) -> Result<()> {
    let songs = load_dataset(input)
        .with_context(|| format!("Failed to read dataset {}", input.display()))?;

    let outcome = backfill(&songs);
    if outcome.applied == 0 {
        println!("No charts need a level-derived constant.");
        return Ok(());
    }

    save_dataset(output, &outcome.songs)
        .with_context(|| format!("Failed to write dataset {}", output.display()))?;
    println!(
        "Applied levels as constants to {} charts -> {}",
        outcome.applied,
        output.display()
    );

    Ok(())
}
