//! # segament-core
//!
//! Core library for building the CHUNITHM chart dataset.
//!
//! This crate provides:
//! - Song and chart data structures in the chunirec `showall` shape
//! - Title normalization and content-derived song ids
//! - Spreadsheet ingestion into a chart lookup and new-song candidates
//! - The merge engine and the level-to-constant backfill pass
//! - chunirec and Google Sheets clients behind source traits
//! - Dataset persistence

pub mod chart;
pub mod config;
pub mod error;
pub mod merge;
pub mod network;
pub mod sheet;
pub mod storage;
pub mod update;

pub use chart::{
    ChartRecord, Difficulty, Level, Song, SongMeta, format_level, generate_segament_id,
    normalize_difficulty_label, normalize_title,
};
pub use config::{NewSongColumns, Settings, SheetLayout};
pub use error::{Error, Result};
pub use merge::{BackfillOutcome, MergeOutcome, MergeReport, backfill, merge};
pub use network::{ChunirecClient, GoogleSheetsClient, MusicSource, SheetSource};
pub use sheet::{ChartKey, NewSongCandidate, Row, SheetData, SheetEntry, SheetIngestor, SheetLookup};
pub use storage::{DatasetSummary, load_dataset, save_dataset};
pub use update::{UpdateSummary, Updater};
