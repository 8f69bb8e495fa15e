//! Inspect command: summarize a dataset and check its invariants.

use std::path::Path;

use anyhow::{Context, Result, bail};
use segament_core::{DatasetSummary, load_dataset};

pub fn run(input: &Path, json: bool) -> Result<()> {
    let songs = load_dataset(input)
        .with_context(|| format!("Failed to read dataset {}", input.display()))?;
    let summary = DatasetSummary::from_songs(&songs);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Songs:              {}", summary.songs);
        println!("Charts:             {}", summary.charts);
        println!("Unknown constants:  {}", summary.unknown_constants);
        println!("Inconsistent flags: {}", summary.inconsistent_flags);
        println!("Duplicate ids:      {}", summary.duplicate_ids.len());
        for id in &summary.duplicate_ids {
            println!("  - {}", id);
        }
    }

    if !summary.is_consistent() {
        bail!(
            "Dataset has {} duplicate ids and {} inconsistent unknown flags",
            summary.duplicate_ids.len(),
            summary.inconsistent_flags
        );
    }

    Ok(())
}
