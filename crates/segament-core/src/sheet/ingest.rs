use std::collections::HashMap;

use tracing::{debug, error, info, warn};

use crate::chart::Difficulty;
use crate::config::{NewSongColumns, SheetLayout};
use crate::network::SheetSource;
use crate::sheet::{CandidateChart, ChartKey, SheetData, SheetEntry};

/// One spreadsheet row; missing trailing cells are simply absent.
pub type Row = Vec<String>;

/// Result of reading one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetOutcome {
    Empty,
    MissingHeader,
    Read { records: usize, skipped: usize },
}

/// One record of the new-song sheet.
#[derive(Debug, Clone, PartialEq)]
struct NewSongRecord {
    title: String,
    difficulty: Difficulty,
    genre: Option<String>,
    level: Option<String>,
    constant: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
enum RecordParse {
    Blank,
    Malformed(String),
    Accepted(NewSongRecord),
}

/// Turns raw sheet rows into the lookup table and new-song candidates.
pub struct SheetIngestor<'a> {
    layout: &'a SheetLayout,
}

impl<'a> SheetIngestor<'a> {
    pub fn new(layout: &'a SheetLayout) -> Self {
        Self { layout }
    }

    /// Read every configured sheet. A failing sheet is logged and skipped.
    pub fn ingest_all<S: SheetSource + ?Sized>(&self, source: &S) -> SheetData {
        let mut data = SheetData::default();

        for sheet in &self.layout.sheets {
            info!("  - Reading sheet '{}'", sheet);
            let rows = match source.fetch_rows(sheet) {
                Ok(rows) => rows,
                Err(e) => {
                    error!("  - Failed to process sheet '{}': {}", sheet, e);
                    continue;
                }
            };

            match self.ingest_sheet(&mut data, sheet, &rows) {
                SheetOutcome::Empty => warn!("  - Sheet '{}' is empty", sheet),
                SheetOutcome::MissingHeader => {
                    warn!("  - Header not found in sheet '{}', skipped", sheet)
                }
                SheetOutcome::Read { records, skipped } => {
                    debug!("  - Sheet '{}': {} records, {} skipped", sheet, records, skipped)
                }
            }
        }

        info!(
            "  - Loaded {} unique chart entries from the spreadsheet",
            data.lookup.len()
        );
        info!(
            "  - Found {} new song candidates on '{}'",
            data.candidates.len(),
            self.layout.new_song_sheet
        );

        data
    }

    /// Ingest the rows of one sheet into `data`.
    pub fn ingest_sheet(&self, data: &mut SheetData, sheet: &str, rows: &[Row]) -> SheetOutcome {
        if rows.is_empty() {
            return SheetOutcome::Empty;
        }
        if self.layout.is_new_song_sheet(sheet) {
            self.ingest_new_song_sheet(data, sheet, rows)
        } else {
            self.ingest_constant_sheet(data, sheet, rows)
        }
    }

    fn ingest_new_song_sheet(&self, data: &mut SheetData, sheet: &str, rows: &[Row]) -> SheetOutcome {
        let header = self.layout.title_header.as_str();
        let Some(header_idx) = rows
            .iter()
            .position(|row| row.first().is_some_and(|c| c.trim() == header))
        else {
            return SheetOutcome::MissingHeader;
        };

        let columns = &self.layout.new_song_columns;
        let mut records = 0;
        let mut skipped = 0;

        for (row_idx, row) in rows.iter().enumerate().skip(header_idx + 1) {
            for (group_idx, group) in row.chunks(columns.stride).enumerate() {
                match parse_new_song_record(group, columns) {
                    RecordParse::Blank => {}
                    RecordParse::Malformed(reason) => {
                        skipped += 1;
                        warn!(
                            "  - '{}' row {} record {}: {}, skipped",
                            sheet,
                            row_idx + 1,
                            group_idx + 1,
                            reason
                        );
                    }
                    RecordParse::Accepted(record) => {
                        records += 1;
                        data.lookup.insert(
                            ChartKey::new(record.title.clone(), record.difficulty),
                            SheetEntry {
                                constant: record.constant,
                                level: record.level.clone(),
                                genre: record.genre.clone(),
                            },
                        );
                        data.candidates.record(
                            &record.title,
                            record.genre,
                            record.difficulty,
                            CandidateChart {
                                level: record.level,
                                constant: record.constant,
                            },
                        );
                    }
                }
            }
        }

        SheetOutcome::Read { records, skipped }
    }

    fn ingest_constant_sheet(
        &self,
        data: &mut SheetData,
        sheet: &str,
        rows: &[Row],
    ) -> SheetOutcome {
        let layout = self.layout;
        let Some(header_idx) = rows
            .iter()
            .position(|row| row.iter().any(|c| c.trim() == layout.title_header))
        else {
            return SheetOutcome::MissingHeader;
        };

        // Duplicate header names resolve to the rightmost column.
        let columns: HashMap<&str, usize> = rows[header_idx]
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim(), i))
            .collect();

        let (Some(&title_col), Some(&difficulty_col)) = (
            columns.get(layout.title_header.as_str()),
            columns.get(layout.difficulty_header.as_str()),
        ) else {
            return SheetOutcome::MissingHeader;
        };
        let primary_col = columns.get(layout.primary_constant_header.as_str()).copied();
        let secondary_col = columns.get(layout.secondary_constant_header.as_str()).copied();

        let mut records = 0;
        let mut skipped = 0;

        for row in rows.iter().skip(header_idx + 1) {
            if row.iter().all(|c| c.trim().is_empty()) {
                continue;
            }

            let title = cell(row, title_col);
            let difficulty = Difficulty::from_label(cell(row, difficulty_col));
            let (Some(title), Some(difficulty)) = (title, difficulty) else {
                skipped += 1;
                continue;
            };

            let constant = primary_col
                .and_then(|i| cell(row, i))
                .and_then(parse_number)
                .or_else(|| secondary_col.and_then(|i| cell(row, i)).and_then(parse_number));

            records += 1;
            let replaced = data.lookup.insert(
                ChartKey::new(title, difficulty),
                SheetEntry {
                    constant,
                    level: None,
                    genre: None,
                },
            );
            if replaced {
                debug!("  - '{}': {} [{}] replaces an earlier row", sheet, title, difficulty);
            }
        }

        SheetOutcome::Read { records, skipped }
    }
}

fn parse_new_song_record(group: &[String], columns: &NewSongColumns) -> RecordParse {
    if group.iter().all(|c| c.trim().is_empty()) {
        return RecordParse::Blank;
    }

    let Some(title) = cell(group, columns.title) else {
        return RecordParse::Malformed("no title".to_string());
    };
    let label = cell(group, columns.difficulty);
    let Some(difficulty) = Difficulty::from_label(label) else {
        return RecordParse::Malformed(format!(
            "unrecognized difficulty '{}' for '{}'",
            label.unwrap_or_default(),
            title
        ));
    };

    RecordParse::Accepted(NewSongRecord {
        title: title.to_string(),
        difficulty,
        genre: cell(group, columns.genre).map(str::to_string),
        level: cell(group, columns.level).map(str::to_string),
        constant: cell(group, columns.constant).and_then(parse_number),
    })
}

/// Trimmed, non-empty cell contents.
fn cell(row: &[String], idx: usize) -> Option<&str> {
    row.get(idx).map(|c| c.trim()).filter(|c| !c.is_empty())
}

/// Parse the leading number of a cell ("13.7", "13.7?", "+14").
///
/// Cells without a leading number are treated as absent.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            end = frac_end;
            has_digits = true;
        }
    }

    if !has_digits {
        return None;
    }
    text[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn ingest(sheet: &str, rows: &[Row]) -> (SheetData, SheetOutcome) {
        let layout = SheetLayout::default();
        let ingestor = SheetIngestor::new(&layout);
        let mut data = SheetData::default();
        let outcome = ingestor.ingest_sheet(&mut data, sheet, rows);
        (data, outcome)
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("13.2"), Some(13.2));
        assert_eq!(parse_number(" 14 "), Some(14.0));
        assert_eq!(parse_number("13.7?"), Some(13.7));
        assert_eq!(parse_number("+14.1"), Some(14.1));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("13."), Some(13.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("?"), None);
        assert_eq!(parse_number("未定"), None);
    }

    #[test]
    fn test_constant_sheet_prefers_primary() {
        let rows = vec![
            row(&["13.8～13.9"]),
            row(&["曲名", "譜面", "VRS", "XVRS"]),
            row(&["Song A", "MASTER", "13.7", "13.9"]),
            row(&["Song B", "EXPERT", "12.5", ""]),
            row(&["Song C", "ULTIMA", "-", "?"]),
        ];
        let (data, outcome) = ingest("13.8～13.9", &rows);

        assert_eq!(outcome, SheetOutcome::Read { records: 3, skipped: 0 });
        assert_eq!(data.lookup.get("Song A", Difficulty::Master).unwrap().constant, Some(13.9));
        assert_eq!(data.lookup.get("Song B", Difficulty::Expert).unwrap().constant, Some(12.5));

        let c = data.lookup.get("Song C", Difficulty::Ultima).unwrap();
        assert_eq!(c.constant, None);
        assert_eq!(c.level, None);
        assert_eq!(c.genre, None);
        assert!(data.candidates.is_empty());
    }

    #[test]
    fn test_constant_sheet_skips_incomplete_rows() {
        let rows = vec![
            row(&["曲名", "譜面", "XVRS"]),
            row(&["", "MASTER", "13.0"]),
            row(&["Song A", "", "13.0"]),
            row(&["Song A"]),
            row(&[]),
            row(&["Song B", "MAS", "14.0"]),
        ];
        let (data, outcome) = ingest("14", &rows);

        assert_eq!(outcome, SheetOutcome::Read { records: 1, skipped: 3 });
        assert_eq!(data.lookup.len(), 1);
        assert_eq!(data.lookup.get("Song B", Difficulty::Master).unwrap().constant, Some(14.0));
    }

    #[test]
    fn test_constant_sheet_without_header() {
        let rows = vec![row(&["Title", "Difficulty"]), row(&["Song A", "MASTER"])];
        let (data, outcome) = ingest("14", &rows);
        assert_eq!(outcome, SheetOutcome::MissingHeader);
        assert!(data.lookup.is_empty());
    }

    #[test]
    fn test_empty_sheet() {
        let (_, outcome) = ingest("14", &[]);
        assert_eq!(outcome, SheetOutcome::Empty);
    }

    #[test]
    fn test_new_song_sheet_side_by_side_records() {
        let rows = vec![
            row(&["新曲のみ"]),
            row(&["曲名", "譜面", "ジャンル", "表示Lv", "定数", "", "曲名", "譜面"]),
            row(&[
                "Song B", "EXPERT", "ORIGINAL", "11", "", "", "Song B", "MASTER", "ORIGINAL",
                "13+", "13.6",
            ]),
            row(&["Song C", "MAS", "", "12", "12.2"]),
        ];
        let (data, outcome) = ingest("新曲のみ", &rows);

        assert_eq!(outcome, SheetOutcome::Read { records: 3, skipped: 0 });

        let b_exp = data.lookup.get("Song B", Difficulty::Expert).unwrap();
        assert_eq!(b_exp.constant, None);
        assert_eq!(b_exp.level.as_deref(), Some("11"));
        assert_eq!(b_exp.genre.as_deref(), Some("ORIGINAL"));

        let b = data.candidates.get("Song B").unwrap();
        assert_eq!(b.charts.len(), 2);
        assert_eq!(b.charts[&Difficulty::Master].constant, Some(13.6));
        assert_eq!(b.charts[&Difficulty::Master].level.as_deref(), Some("13+"));

        let c = data.candidates.get("Song C").unwrap();
        assert_eq!(c.genre, None);
        assert_eq!(c.charts[&Difficulty::Master].constant, Some(12.2));
    }

    #[test]
    fn test_new_song_sheet_requires_header_in_first_cell() {
        let rows = vec![row(&["", "曲名"]), row(&["Song B", "EXPERT", "", "11", ""])];
        let (data, outcome) = ingest("新曲のみ", &rows);
        assert_eq!(outcome, SheetOutcome::MissingHeader);
        assert!(data.candidates.is_empty());
    }

    #[test]
    fn test_new_song_sheet_skips_malformed_records() {
        let rows = vec![
            row(&["曲名", "譜面", "ジャンル", "表示Lv", "定数", ""]),
            row(&["Song D", "", "ORIGINAL", "12", "12.0", ""]),
            row(&["", "MASTER", "ORIGINAL", "12", "12.0", ""]),
            row(&["   ", "", "", "", "", ""]),
            row(&["Song E", "LUNATIC", "", "12", "", ""]),
        ];
        let (data, outcome) = ingest("新曲のみ", &rows);

        assert_eq!(outcome, SheetOutcome::Read { records: 0, skipped: 3 });
        assert!(data.lookup.is_empty());
        assert!(data.candidates.is_empty());
    }

    #[test]
    fn test_constant_sheet_row_replaces_new_song_entry() {
        let layout = SheetLayout::default();
        let ingestor = SheetIngestor::new(&layout);
        let mut data = SheetData::default();

        ingestor.ingest_sheet(
            &mut data,
            "新曲のみ",
            &[
                row(&["曲名", "譜面", "ジャンル", "表示Lv", "定数", ""]),
                row(&["S", "MASTER", "ORIGINAL", "13+", "13.6", ""]),
            ],
        );
        ingestor.ingest_sheet(
            &mut data,
            "13",
            &[row(&["曲名", "譜面", "XVRS"]), row(&["S", "MASTER", "-"])],
        );

        let entry = data.lookup.get("S", Difficulty::Master).unwrap();
        assert_eq!(entry.constant, None);
        assert_eq!(entry.level, None);
        assert_eq!(entry.genre, None);

        // The candidate itself still carries what the new-song sheet said.
        let candidate = data.candidates.get("S").unwrap();
        assert_eq!(candidate.charts[&Difficulty::Master].constant, Some(13.6));
    }

    #[test]
    fn test_titles_are_trimmed() {
        let rows = vec![
            row(&["曲名", "譜面", "XVRS"]),
            row(&[" Song A ", " master ", "13.3"]),
        ];
        let (data, _) = ingest("13", &rows);
        assert!(data.lookup.get("Song A", Difficulty::Master).is_some());
    }
}
