use serde::Deserialize;
use serde_json::Value;
use ureq::Agent;

use crate::config::{Settings, api, sheets};
use crate::error::{Error, Result};
use crate::network::{SheetSource, build_agent};
use crate::sheet::Row;

#[derive(Debug, Deserialize)]
struct BatchGetResponse {
    #[serde(default, rename = "valueRanges")]
    value_ranges: Vec<ValueRange>,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Read-only Google Sheets v4 client authenticated by API key.
pub struct GoogleSheetsClient {
    agent: Agent,
    base_url: String,
    api_key: String,
    spreadsheet_id: String,
}

impl GoogleSheetsClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            agent: build_agent(api::REQUEST_TIMEOUT),
            base_url: sheets::BASE_URL.to_string(),
            api_key: settings.api_key.clone(),
            spreadsheet_id: settings.sheet_id.clone(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn batch_get_url(&self) -> String {
        format!(
            "{}/{}/values:batchGet",
            self.base_url.trim_end_matches('/'),
            self.spreadsheet_id
        )
    }
}

impl SheetSource for GoogleSheetsClient {
    fn fetch_rows(&self, sheet: &str) -> Result<Vec<Row>> {
        let mut response = self
            .agent
            .get(self.batch_get_url())
            .query("ranges", a1_sheet_range(sheet))
            .query("key", &self.api_key)
            .call()
            .map_err(|e| sheet_error(sheet, e))?;
        let body: BatchGetResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| sheet_error(sheet, e))?;

        Ok(body
            .value_ranges
            .into_iter()
            .next()
            .map(|range| rows_from_values(range.values))
            .unwrap_or_default())
    }
}

fn sheet_error(sheet: &str, e: ureq::Error) -> Error {
    Error::Sheet {
        sheet: sheet.to_string(),
        message: Error::from(e).to_string(),
    }
}

/// Quote a sheet name for A1 notation ("it's" -> "'it''s'").
fn a1_sheet_range(sheet: &str) -> String {
    format!("'{}'", sheet.replace('\'', "''"))
}

fn rows_from_values(values: Vec<Vec<Value>>) -> Vec<Row> {
    values
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect()
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Bool(b) => String::from(if b { "TRUE" } else { "FALSE" }),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a1_sheet_range() {
        assert_eq!(a1_sheet_range("14+"), "'14+'");
        assert_eq!(a1_sheet_range("15,15+"), "'15,15+'");
        assert_eq!(a1_sheet_range("it's"), "'it''s'");
    }

    #[test]
    fn test_parse_batch_get_response() {
        let json = r#"{
            "spreadsheetId": "abc",
            "valueRanges": [{
                "range": "'14'!A1:Z1000",
                "majorDimension": "ROWS",
                "values": [["曲名", "譜面", "XVRS"], ["Song A", "MASTER", 14.2], [], ["Song B", null, true]]
            }]
        }"#;
        let body: BatchGetResponse = serde_json::from_str(json).unwrap();
        let rows = rows_from_values(body.value_ranges.into_iter().next().unwrap().values);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1], vec!["Song A", "MASTER", "14.2"]);
        assert!(rows[2].is_empty());
        assert_eq!(rows[3], vec!["Song B", "", "TRUE"]);
    }

    #[test]
    fn test_empty_range_has_no_values() {
        let json = r#"{ "valueRanges": [{ "range": "'12'!A1:Z1000" }] }"#;
        let body: BatchGetResponse = serde_json::from_str(json).unwrap();
        assert!(body.value_ranges[0].values.is_empty());
    }
}
