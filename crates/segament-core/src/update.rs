use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use crate::config::SheetLayout;
use crate::error::Result;
use crate::merge::{MergeReport, backfill, merge};
use crate::network::{MusicSource, SheetSource};
use crate::sheet::SheetIngestor;
use crate::storage::save_dataset;

/// Result of one update run.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSummary {
    pub songs: usize,
    pub merge: MergeReport,
    pub backfilled: usize,
    /// Number of times the dataset file was written (1 or 2).
    pub writes: usize,
}

/// Fetch, merge, persist, backfill, persist.
pub struct Updater<'a, M: ?Sized, S: ?Sized> {
    music: &'a M,
    sheets: &'a S,
    layout: &'a SheetLayout,
}

impl<'a, M, S> Updater<'a, M, S>
where
    M: MusicSource + ?Sized,
    S: SheetSource + ?Sized,
{
    pub fn new(music: &'a M, sheets: &'a S, layout: &'a SheetLayout) -> Self {
        Self {
            music,
            sheets,
            layout,
        }
    }

    pub fn run<P: AsRef<Path>>(&self, output: P, today: NaiveDate) -> Result<UpdateSummary> {
        let output = output.as_ref();

        info!("[1/5] Fetching the latest song data from chunirec...");
        let api_songs = self.music.fetch_all()?;
        info!("  - Loaded {} songs", api_songs.len());

        info!("[2/5] Reading the spreadsheet...");
        let sheet = SheetIngestor::new(self.layout).ingest_all(self.sheets);

        info!("[3/5] Merging API and spreadsheet data...");
        let merged = merge(&api_songs, &sheet, today);
        log_merge_report(&merged.report, &self.layout.new_song_sheet);

        info!("[4/5] Saving the dataset...");
        save_dataset(output, &merged.songs)?;
        info!("  - Saved to {}", output.display());
        let mut writes = 1;

        info!("[5/5] Applying levels to charts without a constant...");
        let backfilled = backfill(&merged.songs);
        if backfilled.applied > 0 {
            info!(
                "  - Applied levels as constants to {} charts, saving again",
                backfilled.applied
            );
            save_dataset(output, &backfilled.songs)?;
            writes += 1;
        } else {
            info!("  - No charts need a level-derived constant");
        }

        info!("Processed {} songs", backfilled.songs.len());

        Ok(UpdateSummary {
            songs: backfilled.songs.len(),
            merge: merged.report,
            backfilled: backfilled.applied,
            writes,
        })
    }
}

fn log_merge_report(report: &MergeReport, new_song_sheet: &str) {
    info!("  - Updated {} chart constants", report.const_updates);
    for title in &report.updated_titles {
        info!("    • {}", title);
    }

    if report.added_titles.is_empty() {
        info!(
            "  - No new songs to add from '{}' (all already in the API)",
            new_song_sheet
        );
    } else {
        info!(
            "  - Added {} new songs from '{}':",
            report.added_titles.len(),
            new_song_sheet
        );
        for title in &report.added_titles {
            info!("    • {}", title);
        }
    }
}
