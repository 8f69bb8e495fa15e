//! Remote data sources.
//!
//! The merge only sees the [`MusicSource`] and [`SheetSource`] traits; the
//! chunirec and Google Sheets clients implement them over blocking HTTP.

mod chunirec;
mod client;
mod sheets;

pub use chunirec::ChunirecClient;
pub use client::build_agent;
pub use sheets::GoogleSheetsClient;

use crate::chart::Song;
use crate::error::Result;
use crate::sheet::Row;

/// Provider of the upstream song list.
pub trait MusicSource {
    fn fetch_all(&self) -> Result<Vec<Song>>;
}

/// Provider of spreadsheet rows, one sheet at a time.
pub trait SheetSource {
    fn fetch_rows(&self, sheet: &str) -> Result<Vec<Row>>;
}

/// Run `primary`; on failure run `fallback` with the primary error.
///
/// If the fallback fails too, the primary error is returned.
pub fn with_fallback<T, P, F>(primary: P, fallback: F) -> Result<T>
where
    P: FnOnce() -> Result<T>,
    F: FnOnce(&crate::Error) -> Result<T>,
{
    match primary() {
        Ok(value) => Ok(value),
        Err(primary_err) => fallback(&primary_err).map_err(|_| primary_err),
    }
}
