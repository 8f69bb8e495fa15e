use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::chart::Song;
use crate::error::Result;

/// Write the dataset as pretty JSON, creating parent directories.
pub fn save_dataset<P: AsRef<Path>>(path: P, songs: &[Song]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut json = serde_json::to_string_pretty(songs)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}

pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<Song>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Counts and invariant checks over a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub songs: usize,
    pub charts: usize,
    /// Charts still flagged `is_const_unknown`.
    pub unknown_constants: usize,
    /// Charts flagged unknown even though they carry a non-zero constant.
    pub inconsistent_flags: usize,
    /// Ids used by more than one song.
    pub duplicate_ids: Vec<String>,
}

impl DatasetSummary {
    pub fn from_songs(songs: &[Song]) -> Self {
        let mut summary = Self {
            songs: songs.len(),
            ..Default::default()
        };
        let mut id_counts: HashMap<&str, usize> = HashMap::new();

        for song in songs {
            *id_counts.entry(song.meta.id.as_str()).or_default() += 1;
            for chart in song.data.values() {
                summary.charts += 1;
                if chart.is_const_unknown {
                    summary.unknown_constants += 1;
                    if !chart.constant_is_unset() {
                        summary.inconsistent_flags += 1;
                    }
                }
            }
        }

        summary.duplicate_ids = id_counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, _)| id.to_string())
            .collect();
        summary.duplicate_ids.sort();
        summary
    }

    pub fn is_consistent(&self) -> bool {
        self.inconsistent_flags == 0 && self.duplicate_ids.is_empty()
    }
}
