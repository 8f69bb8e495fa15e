use serde::{Deserialize, Serialize};

/// Chart level as it moves through the merge.
///
/// The API delivers plain numbers (`13.5`); after formatting the dataset
/// holds the in-game display string (`"13+"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Level {
    Numeric(f64),
    Display(String),
}

impl Level {
    /// Parse a spreadsheet cell. Unparseable text becomes level 0.
    pub fn from_cell(cell: &str) -> Self {
        Level::Numeric(parse_display_level(cell).unwrap_or(0.0))
    }

    /// Convert to the display convention; display strings pass through.
    pub fn formatted(&self) -> Self {
        match self {
            Level::Numeric(value) => Level::Display(format_level(*value)),
            Level::Display(text) => Level::Display(text.clone()),
        }
    }

    /// Whether the level carries no information (`0` or an empty string).
    pub fn is_blank(&self) -> bool {
        match self {
            Level::Numeric(value) => *value == 0.0,
            Level::Display(text) => text.is_empty(),
        }
    }

    /// Best-effort numeric value: `"13+"` reads as `13.5`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Level::Numeric(value) => Some(*value),
            Level::Display(text) => parse_display_level(text),
        }
    }
}

/// Format a numeric level: `.5` and above gets a `+`, the rest is floored.
pub fn format_level(level: f64) -> String {
    let integer = level.floor();
    if level - integer >= 0.5 {
        format!("{}+", integer as i64)
    } else {
        format!("{}", integer as i64)
    }
}

/// Inverse of [`format_level`] for the lower bound of a band.
pub fn parse_display_level(text: &str) -> Option<f64> {
    let text = text.trim();
    let value = match text.strip_suffix('+') {
        Some(base) => format!("{}.5", base.trim()),
        None => text.to_string(),
    };
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_level() {
        assert_eq!(format_level(13.7), "13+");
        assert_eq!(format_level(13.2), "13");
        assert_eq!(format_level(12.5), "12+");
        assert_eq!(format_level(12.49), "12");
        assert_eq!(format_level(14.0), "14");
        assert_eq!(format_level(0.0), "0");
    }

    #[test]
    fn test_parse_display_level() {
        assert_eq!(parse_display_level("12+"), Some(12.5));
        assert_eq!(parse_display_level("13"), Some(13.0));
        assert_eq!(parse_display_level(" 14.6 "), Some(14.6));
        assert_eq!(parse_display_level(""), None);
        assert_eq!(parse_display_level("+"), None);
        assert_eq!(parse_display_level("abc"), None);
    }

    #[test]
    fn test_formatted_passthrough() {
        let display = Level::Display("13+".to_string());
        assert_eq!(display.formatted(), display);
        assert_eq!(Level::Numeric(11.5).formatted(), Level::Display("11+".to_string()));
    }

    #[test]
    fn test_from_cell() {
        assert_eq!(Level::from_cell("13+"), Level::Numeric(13.5));
        assert_eq!(Level::from_cell("11"), Level::Numeric(11.0));
        assert_eq!(Level::from_cell("?"), Level::Numeric(0.0));
    }

    #[test]
    fn test_is_blank() {
        assert!(Level::Numeric(0.0).is_blank());
        assert!(Level::Display(String::new()).is_blank());
        assert!(!Level::Display("0".to_string()).is_blank());
        assert!(!Level::Numeric(1.0).is_blank());
    }

    #[test]
    fn test_serde_untagged() {
        let numeric: Level = serde_json::from_str("13.5").unwrap();
        assert_eq!(numeric, Level::Numeric(13.5));
        let display: Level = serde_json::from_str("\"13+\"").unwrap();
        assert_eq!(display, Level::Display("13+".to_string()));
        assert_eq!(serde_json::to_string(&display).unwrap(), "\"13+\"");
    }
}
