use crate::config::api;
use crate::error::{Error, Result};

/// Validated run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// chunirec access token; without it only the public endpoint works.
    pub access_token: Option<String>,
    pub user_name: Option<String>,
    pub api_key: String,
    pub sheet_id: String,
    pub region: String,
}

impl Settings {
    /// Build settings from optional values (flags or environment).
    ///
    /// Blank values count as missing. The Google API key and spreadsheet id
    /// are required.
    pub fn from_parts(
        access_token: Option<String>,
        user_name: Option<String>,
        api_key: Option<String>,
        sheet_id: Option<String>,
    ) -> Result<Self> {
        let api_key = non_blank(api_key).ok_or(Error::MissingConfig("GOOGLE_API_KEY"))?;
        let sheet_id = non_blank(sheet_id).ok_or(Error::MissingConfig("GOOGLE_SHEET_ID"))?;

        Ok(Self {
            access_token: non_blank(access_token),
            user_name: non_blank(user_name),
            api_key,
            sheet_id,
            region: api::DEFAULT_REGION.to_string(),
        })
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
