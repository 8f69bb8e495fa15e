use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde_json::Map;
use tracing::{debug, info, warn};

use crate::chart::{ChartRecord, Level, Song, SongMeta, generate_segament_id};
use crate::config::output;
use crate::sheet::{NewSongCandidate, SheetData, SheetLookup};

/// What a merge changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeReport {
    /// Charts whose constant was replaced by the sheet value.
    pub const_updates: usize,
    /// Titles with at least one constant update, in API order.
    pub updated_titles: Vec<String>,
    /// Songs synthesized from the new-song sheet.
    pub added_titles: Vec<String>,
    /// Candidates skipped because the API already lists the title.
    pub already_present: Vec<String>,
    /// Candidates skipped because their generated id is taken.
    pub id_collisions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub songs: Vec<Song>,
    pub report: MergeReport,
}

/// Combine the API song list with spreadsheet data into a new song list.
///
/// `today` becomes the release date of synthesized songs.
pub fn merge(api_songs: &[Song], sheet: &SheetData, today: NaiveDate) -> MergeOutcome {
    let mut report = MergeReport::default();

    let mut songs: Vec<Song> = api_songs
        .iter()
        .map(|song| merge_song(song, &sheet.lookup, &mut report))
        .collect();

    let mut titles: HashSet<String> = songs.iter().map(|s| s.meta.title.clone()).collect();
    let mut ids: HashSet<String> = songs.iter().map(|s| s.meta.id.clone()).collect();

    for candidate in sheet.candidates.iter() {
        if titles.contains(&candidate.title) {
            debug!("    - \"{}\" is already in the API data", candidate.title);
            report.already_present.push(candidate.title.clone());
            continue;
        }

        let song = synthesize_song(candidate, today);
        if ids.contains(&song.meta.id) {
            warn!(
                "    - \"{}\" skipped: id {} is already taken",
                candidate.title, song.meta.id
            );
            report.id_collisions.push(candidate.title.clone());
            continue;
        }

        info!("    - New song: \"{}\" (not in API)", candidate.title);
        titles.insert(song.meta.title.clone());
        ids.insert(song.meta.id.clone());
        report.added_titles.push(song.meta.title.clone());
        songs.push(song);
    }

    MergeOutcome { songs, report }
}

fn merge_song(song: &Song, lookup: &SheetLookup, report: &mut MergeReport) -> Song {
    let mut song = song.clone();
    let title = song.meta.title.clone();

    // World's End ids churn upstream.
    if song.meta.is_worlds_end() {
        song.meta.id = generate_segament_id(
            &title,
            Some(song.meta.artist.as_str()),
            true,
            Some(song.meta.id.as_str()),
        );
    }

    if !song.meta.has_genre()
        && let Some(genre) = song
            .data
            .keys()
            .find_map(|&d| lookup.get(&title, d).and_then(|e| e.genre.clone()))
    {
        song.meta.genre = Some(genre);
    }

    let mut updated = false;
    for (&difficulty, chart) in song.data.iter_mut() {
        let Some(entry) = lookup.get(&title, difficulty) else {
            chart.level = chart.level.as_ref().map(Level::formatted);
            chart.is_const_unknown = chart.constant_is_unset();
            continue;
        };

        if let Some(constant) = entry.constant
            && chart.constant != Some(constant)
        {
            chart.constant = Some(constant);
            report.const_updates += 1;
            updated = true;
        }

        if chart.level_is_blank()
            && let Some(level) = &entry.level
        {
            chart.level = Some(Level::from_cell(level));
        }

        chart.level = chart.level.as_ref().map(Level::formatted);
        chart.is_const_unknown = chart.constant_is_unset() && entry.constant.is_none();
    }

    if updated {
        report.updated_titles.push(title);
    }

    song
}

fn synthesize_song(candidate: &NewSongCandidate, today: NaiveDate) -> Song {
    let data: BTreeMap<_, _> = candidate
        .charts
        .iter()
        .map(|(&difficulty, chart)| {
            let record = ChartRecord {
                level: Some(Level::from_cell(chart.level.as_deref().unwrap_or_default()).formatted()),
                constant: Some(chart.constant.unwrap_or(0.0)),
                maxcombo: Some(0),
                is_const_unknown: chart.constant.is_none(),
                extra: Map::new(),
            };
            (difficulty, record)
        })
        .collect();

    Song {
        meta: SongMeta {
            id: generate_segament_id(&candidate.title, None, false, None),
            title: candidate.title.clone(),
            genre: Some(
                candidate
                    .genre
                    .clone()
                    .unwrap_or_else(|| output::DEFAULT_GENRE.to_string()),
            ),
            artist: output::UNKNOWN_ARTIST.to_string(),
            release: Some(today.format("%Y-%m-%d").to_string()),
            bpm: Some(0),
            extra: Map::new(),
        },
        data,
    }
}
