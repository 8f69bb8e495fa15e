//! Configuration.
//!
//! This module contains types for run configuration:
//! - `Settings` - credentials and ids, validated before any network call
//! - `SheetLayout` - which spreadsheet tabs to read and how they are laid out
//! - API and output constants

mod layout;
mod settings;

pub use layout::*;
pub use settings::*;

/// chunirec API configuration.
pub mod api {
    use std::time::Duration;

    pub const BASE_URL: &str = "https://api.chunirec.net/2.0";

    /// Region parameter sent with authenticated requests.
    pub const DEFAULT_REGION: &str = "jp2";

    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
}

/// Google Sheets API configuration.
pub mod sheets {
    pub const BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
}

/// Output configuration.
pub mod output {
    /// Default dataset path, relative to the working directory.
    pub const DEFAULT_PATH: &str = "data/chunithm-music.json";

    /// Genre given to songs synthesized from the new-song sheet.
    pub const DEFAULT_GENRE: &str = "VARIETY";

    /// Artist given to songs synthesized from the new-song sheet.
    pub const UNKNOWN_ARTIST: &str = "Unknown";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_constants() {
        assert!(api::BASE_URL.starts_with("https://"));
        assert_eq!(api::REQUEST_TIMEOUT.as_secs(), 30);
    }

    #[test]
    fn test_output_constants() {
        assert!(output::DEFAULT_PATH.ends_with(".json"));
        assert_eq!(output::DEFAULT_GENRE, "VARIETY");
    }
}
