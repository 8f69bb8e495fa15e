//! Update command: rebuild the dataset from chunirec and the spreadsheet.

use anyhow::{Context, Result};
use chrono::Utc;
use segament_core::{ChunirecClient, GoogleSheetsClient, Settings, SheetLayout, Updater};
use tracing::debug;

use crate::cli::SourceArgs;

pub fn run(args: &SourceArgs) -> Result<()> {
    // Validate before any network call
    let settings = Settings::from_parts(
        args.token.clone(),
        args.user_name.clone(),
        args.api_key.clone(),
        args.sheet_id.clone(),
    )
    .context("Set GOOGLE_API_KEY and GOOGLE_SHEET_ID (or pass --api-key and --sheet-id)")?
    .with_region(&args.region);

    let layout = match &args.layout {
        Some(path) => SheetLayout::load(path)
            .with_context(|| format!("Failed to load sheet layout from {}", path.display()))?,
        None => SheetLayout::default(),
    };
    debug!(
        "Reading {} sheets, new songs from '{}'",
        layout.sheets.len(),
        layout.new_song_sheet
    );

    let music = ChunirecClient::new(&settings);
    let sheets = GoogleSheetsClient::new(&settings);

    let summary = Updater::new(&music, &sheets, &layout)
        .run(&args.output, Utc::now().date_naive())
        .context("Failed to update the dataset. Check that the access token is valid")?;

    println!();
    println!("=== Done ===");
    println!(
        "{} songs processed ({} constants updated, {} songs added, {} levels applied)",
        summary.songs,
        summary.merge.const_updates,
        summary.merge.added_titles.len(),
        summary.backfilled
    );
    println!("Dataset: {}", args.output.display());

    Ok(())
}
