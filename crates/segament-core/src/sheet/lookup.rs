use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use crate::chart::Difficulty;

/// Join key between sheet rows and API charts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChartKey {
    pub title: String,
    pub difficulty: Difficulty,
}

impl ChartKey {
    pub fn new(title: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            title: title.into(),
            difficulty,
        }
    }
}

/// What the spreadsheet says about one chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetEntry {
    pub constant: Option<f64>,
    /// Display level exactly as typed ("13+", "12").
    pub level: Option<String>,
    pub genre: Option<String>,
}

/// Flat (title, difficulty) -> entry table built from every sheet.
#[derive(Debug, Clone, Default)]
pub struct SheetLookup {
    entries: HashMap<ChartKey, SheetEntry>,
}

impl SheetLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the entry for a chart. A row read later replaces the whole entry,
    /// including fields it leaves empty. Returns `true` if an entry was replaced.
    pub fn insert(&mut self, key: ChartKey, entry: SheetEntry) -> bool {
        match self.entries.entry(key) {
            Entry::Occupied(mut slot) => {
                slot.insert(entry);
                true
            }
            Entry::Vacant(slot) => {
                slot.insert(entry);
                false
            }
        }
    }

    pub fn get(&self, title: &str, difficulty: Difficulty) -> Option<&SheetEntry> {
        self.entries.get(&ChartKey::new(title, difficulty))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Level and constant recorded for one difficulty of a new-song candidate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateChart {
    pub level: Option<String>,
    pub constant: Option<f64>,
}

/// A song listed on the new-song sheet, grouped by title.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSongCandidate {
    pub title: String,
    pub genre: Option<String>,
    pub charts: BTreeMap<Difficulty, CandidateChart>,
}

/// New-song candidates in the order they first appear on the sheet.
#[derive(Debug, Clone, Default)]
pub struct CandidateTable {
    candidates: Vec<NewSongCandidate>,
    index: HashMap<String, usize>,
}

impl CandidateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one difficulty of a candidate, creating the candidate on first sight.
    pub fn record(
        &mut self,
        title: &str,
        genre: Option<String>,
        difficulty: Difficulty,
        chart: CandidateChart,
    ) {
        let idx = match self.index.get(title) {
            Some(&idx) => idx,
            None => {
                self.candidates.push(NewSongCandidate {
                    title: title.to_string(),
                    genre: None,
                    charts: BTreeMap::new(),
                });
                self.index.insert(title.to_string(), self.candidates.len() - 1);
                self.candidates.len() - 1
            }
        };

        let candidate = &mut self.candidates[idx];
        if candidate.genre.is_none() {
            candidate.genre = genre;
        }
        candidate.charts.insert(difficulty, chart);
    }

    pub fn get(&self, title: &str) -> Option<&NewSongCandidate> {
        self.index.get(title).map(|&idx| &self.candidates[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &NewSongCandidate> {
        self.candidates.iter()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Everything the ingestor extracted from the spreadsheet.
#[derive(Debug, Clone, Default)]
pub struct SheetData {
    pub lookup: SheetLookup,
    pub candidates: CandidateTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_key_is_structural() {
        let mut lookup = SheetLookup::new();
        lookup.insert(
            ChartKey::new("A-MAS", Difficulty::Expert),
            SheetEntry {
                constant: Some(12.0),
                ..Default::default()
            },
        );

        assert!(lookup.get("A-MAS", Difficulty::Expert).is_some());
        assert!(lookup.get("A", Difficulty::Master).is_none());
        assert!(lookup.get("A-MAS", Difficulty::Master).is_none());
    }

    #[test]
    fn test_later_row_replaces_entry() {
        let mut lookup = SheetLookup::new();
        let key = ChartKey::new("Song", Difficulty::Master);
        let replaced = lookup.insert(
            key.clone(),
            SheetEntry {
                constant: Some(13.6),
                level: Some("13+".to_string()),
                genre: Some("ORIGINAL".to_string()),
            },
        );
        assert!(!replaced);

        let replaced = lookup.insert(key, SheetEntry::default());
        assert!(replaced);

        let entry = lookup.get("Song", Difficulty::Master).unwrap();
        assert_eq!(entry, &SheetEntry::default());
        assert_eq!(lookup.len(), 1);
    }

    #[test]
    fn test_candidates_group_by_title_in_order() {
        let mut table = CandidateTable::new();
        table.record("B", None, Difficulty::Expert, CandidateChart::default());
        table.record(
            "A",
            Some("ORIGINAL".to_string()),
            Difficulty::Master,
            CandidateChart::default(),
        );
        table.record(
            "B",
            Some("POPS".to_string()),
            Difficulty::Master,
            CandidateChart {
                level: Some("13".to_string()),
                constant: Some(13.4),
            },
        );

        let titles: Vec<_> = table.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);

        let b = table.get("B").unwrap();
        assert_eq!(b.charts.len(), 2);
        assert_eq!(b.genre.as_deref(), Some("POPS"));
        assert_eq!(b.charts[&Difficulty::Master].constant, Some(13.4));
    }
}
