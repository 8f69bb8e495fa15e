use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::chart::{Difficulty, Level};

/// Genre whose upstream ids are unstable and get replaced during merge.
pub const WORLDS_END_GENRE: &str = "WORLD'S END";

/// Per-difficulty chart attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRecord {
    #[serde(default)]
    pub level: Option<Level>,
    #[serde(rename = "const", default)]
    pub constant: Option<f64>,
    #[serde(default)]
    pub maxcombo: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_const_unknown: bool,
    /// Upstream fields this tool does not interpret, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChartRecord {
    /// A chart with no precise constant yet (`null` or `0`).
    pub fn constant_is_unset(&self) -> bool {
        self.constant.is_none_or(|c| c == 0.0)
    }

    pub fn level_is_blank(&self) -> bool {
        self.level.as_ref().is_none_or(Level::is_blank)
    }
}

/// Song metadata block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongMeta {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub release: Option<String>,
    #[serde(default)]
    pub bpm: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SongMeta {
    pub fn has_genre(&self) -> bool {
        self.genre.as_deref().is_some_and(|g| !g.is_empty())
    }

    pub fn is_worlds_end(&self) -> bool {
        self.genre.as_deref() == Some(WORLDS_END_GENRE)
    }
}

/// A song with its charts, in the chunirec `showall` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub meta: SongMeta,
    #[serde(default, deserialize_with = "deserialize_charts")]
    pub data: BTreeMap<Difficulty, ChartRecord>,
}

impl Song {
    pub fn title(&self) -> &str {
        &self.meta.title
    }

    pub fn charts(&self) -> impl Iterator<Item = (Difficulty, &ChartRecord)> {
        self.data.iter().map(|(d, c)| (*d, c))
    }
}

/// chunirec sends the flag as `0`/`1`; the dataset writes it as a bool.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    })
}

/// Chart maps keyed by unknown difficulty codes are dropped instead of
/// failing the whole song list.
fn deserialize_charts<'de, D>(deserializer: D) -> Result<BTreeMap<Difficulty, ChartRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, ChartRecord>> = Option::deserialize(deserializer)?;
    let mut charts = BTreeMap::new();

    for (code, record) in raw.unwrap_or_default() {
        match Difficulty::from_str(&code) {
            Ok(difficulty) => {
                charts.insert(difficulty, record);
            }
            Err(_) => warn!("Dropping chart with unknown difficulty code '{}'", code),
        }
    }

    Ok(charts)
}
