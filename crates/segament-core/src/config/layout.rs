use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Positions of the fields inside one record of the new-song sheet.
///
/// Records repeat side by side across a row, `stride` cells apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewSongColumns {
    pub stride: usize,
    pub title: usize,
    pub difficulty: usize,
    pub genre: usize,
    pub level: usize,
    pub constant: usize,
}

impl Default for NewSongColumns {
    fn default() -> Self {
        // 曲名, 譜面, ジャンル, 表示Lv, 定数, (spacer)
        Self {
            stride: 6,
            title: 0,
            difficulty: 1,
            genre: 2,
            level: 3,
            constant: 4,
        }
    }
}

impl NewSongColumns {
    fn offsets(&self) -> [usize; 5] {
        [self.title, self.difficulty, self.genre, self.level, self.constant]
    }
}

/// Spreadsheet layout: which sheets to read and how their headers look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    /// Sheet names in fetch order.
    pub sheets: Vec<String>,
    /// The only sheet allowed to introduce songs missing from the API.
    pub new_song_sheet: String,
    pub title_header: String,
    pub difficulty_header: String,
    /// Constant column preferred when numeric.
    pub primary_constant_header: String,
    pub secondary_constant_header: String,
    pub new_song_columns: NewSongColumns,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            sheets: [
                "新曲のみ",
                "15,15+",
                "14+",
                "14",
                "13.8～13.9",
                "13.5～13.7",
                "13",
                "12+",
                "12",
                "11+",
                "11以下",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            new_song_sheet: "新曲のみ".to_string(),
            title_header: "曲名".to_string(),
            difficulty_header: "譜面".to_string(),
            primary_constant_header: "XVRS".to_string(),
            secondary_constant_header: "VRS".to_string(),
            new_song_columns: NewSongColumns::default(),
        }
    }
}

impl SheetLayout {
    /// Load a layout override from a TOML file. Missing keys keep defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let layout: Self = toml::from_str(content)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sheets.is_empty() {
            return Err(Error::Layout("no sheets configured".to_string()));
        }
        if !self.sheets.contains(&self.new_song_sheet) {
            return Err(Error::Layout(format!(
                "new song sheet '{}' is not in the sheet list",
                self.new_song_sheet
            )));
        }

        let columns = &self.new_song_columns;
        if columns.stride == 0 {
            return Err(Error::Layout("new song stride must be positive".to_string()));
        }
        let offsets = columns.offsets();
        if let Some(offset) = offsets.iter().find(|&&o| o >= columns.stride) {
            return Err(Error::Layout(format!(
                "new song column offset {} exceeds stride {}",
                offset, columns.stride
            )));
        }
        for (i, a) in offsets.iter().enumerate() {
            if offsets[i + 1..].contains(a) {
                return Err(Error::Layout(format!("new song column offset {} is used twice", a)));
            }
        }

        Ok(())
    }

    pub fn is_new_song_sheet(&self, sheet: &str) -> bool {
        sheet == self.new_song_sheet
    }
}
