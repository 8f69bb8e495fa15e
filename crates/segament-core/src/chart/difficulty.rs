use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

/// Chart difficulty as keyed in the chunirec `data` block.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
)]
pub enum Difficulty {
    #[serde(rename = "BAS")]
    #[strum(serialize = "BAS")]
    Basic,
    #[serde(rename = "ADV")]
    #[strum(serialize = "ADV")]
    Advanced,
    #[serde(rename = "EXP")]
    #[strum(serialize = "EXP")]
    Expert,
    #[serde(rename = "MAS")]
    #[strum(serialize = "MAS")]
    Master,
    #[serde(rename = "ULT")]
    #[strum(serialize = "ULT")]
    Ultima,
    #[serde(rename = "WE")]
    #[strum(serialize = "WE")]
    WorldsEnd,
}

impl Difficulty {
    pub fn short_name(&self) -> &'static str {
        self.into()
    }

    /// Parse a human-entered label ("MASTER", "expert", "MAS", ...).
    ///
    /// Returns `None` when the label is blank or maps to a code that is not a
    /// chart difficulty.
    pub fn from_label(label: Option<&str>) -> Option<Self> {
        let code = normalize_difficulty_label(label);
        if code.is_empty() {
            return None;
        }
        Self::from_str(&code).ok()
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Map a spreadsheet difficulty label to the short code used by the API.
///
/// Full names are translated (`MASTER` -> `MAS`); anything else is returned
/// uppercased so that codes typed directly into the sheet pass through.
/// Blank or missing labels yield an empty string.
pub fn normalize_difficulty_label(label: Option<&str>) -> String {
    let Some(label) = label else {
        return String::new();
    };
    let upper = label.trim().to_uppercase();
    match upper.as_str() {
        "MASTER" => "MAS".to_string(),
        "ULTIMA" => "ULT".to_string(),
        "EXPERT" => "EXP".to_string(),
        "ADVANCED" => "ADV".to_string(),
        "BASIC" => "BAS".to_string(),
        _ => upper,
    }
}
