//! HTTP client for the Google Sheets v4 and Drive v3 REST APIs.
//!
//! Authorisation is a bearer token issued elsewhere; the client never
//! refreshes it and never retries.

use async_trait::async_trait;
use quizmaster_core::error::DomainError;
use quizmaster_core::sheets::{
    CellRange, CellValue, MajorDimension, RangeWrite, SpreadsheetRef, SpreadsheetService,
};
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

const SHEETS_ROOT: &str = "https://sheets.googleapis.com";
const DRIVE_ROOT: &str = "https://www.googleapis.com";

/// Id of the first worksheet of a freshly created spreadsheet.
const FIRST_WORKSHEET_ID: u32 = 0;

/// A [`SpreadsheetService`] backed by the Google REST APIs.
#[derive(Debug, Clone)]
pub struct HttpSheetsClient {
    client: reqwest::Client,
    sheets_root: String,
    drive_root: String,
    access_token: String,
}

impl HttpSheetsClient {
    /// Creates a client. `api_base` replaces both Google API roots, which
    /// lets the client talk to a local stand-in.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the TLS backend cannot be initialised.
    pub fn new(access_token: String, api_base: Option<&str>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().build()?;
        let (sheets_root, drive_root) = match api_base {
            Some(base) => {
                let base = base.trim_end_matches('/');
                (base.to_owned(), base.to_owned())
            }
            None => (SHEETS_ROOT.to_owned(), DRIVE_ROOT.to_owned()),
        };
        Ok(Self {
            client,
            sheets_root,
            drive_root,
            access_token,
        })
    }

    fn spreadsheets_url(&self) -> String {
        format!("{}/v4/spreadsheets", self.sheets_root)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        action: &str,
    ) -> Result<reqwest::Response, DomainError> {
        let response = request
            .header(AUTHORIZATION, format!("Bearer {}", self.access_token))
            .send()
            .await
            .map_err(|e| DomainError::Infrastructure(format!("{action} request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Infrastructure(format!(
                "{action} failed with status {status}: {body}"
            )));
        }
        debug!(action, %status, "remote call succeeded");
        Ok(response)
    }

    async fn post_json(
        &self,
        url: String,
        body: &Value,
        action: &str,
    ) -> Result<reqwest::Response, DomainError> {
        self.send(self.client.post(url).json(body), action).await
    }
}

async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    action: &str,
) -> Result<T, DomainError> {
    response
        .json()
        .await
        .map_err(|e| DomainError::Infrastructure(format!("{action} returned an unreadable body: {e}")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedSpreadsheet {
    spreadsheet_id: String,
    spreadsheet_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchGetResponse {
    #[serde(default)]
    value_ranges: Vec<MatchedValueRange>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchedValueRange {
    value_range: ValueRange,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

fn cell_to_json(cell: &CellValue) -> Value {
    match cell {
        CellValue::Text(text) | CellValue::Formula(text) => Value::String(text.clone()),
        CellValue::Number(n) => Value::from(*n),
    }
}

fn json_to_cell(value: Value) -> CellValue {
    match value {
        Value::String(text) => CellValue::Text(text),
        Value::Number(n) => match n.as_i64() {
            Some(n) => CellValue::Number(n),
            None => CellValue::Text(n.to_string()),
        },
        Value::Null => CellValue::Text(String::new()),
        other => CellValue::Text(other.to_string()),
    }
}

fn grid_range(range: &CellRange) -> Value {
    let mut grid = json!(range.grid_bounds());
    grid["sheetId"] = json!(FIRST_WORKSHEET_ID);
    grid
}

/// Body of a `values:batchUpdate` call; formulas are entered as typed.
fn values_update_body(writes: &[RangeWrite]) -> Value {
    let data: Vec<Value> = writes
        .iter()
        .map(|write| {
            let values: Vec<Vec<Value>> = write
                .values
                .iter()
                .map(|line| line.iter().map(cell_to_json).collect())
                .collect();
            json!({
                "range": write.range.to_a1(),
                "majorDimension": write.major_dimension.as_str(),
                "values": values,
            })
        })
        .collect();
    json!({
        "valueInputOption": "USER_ENTERED",
        "data": data,
    })
}

/// Body of a `spreadsheets:batchUpdate` call framing each range with solid
/// borders, inside and out.
fn borders_body(ranges: &[CellRange]) -> Value {
    let solid = json!({ "style": "SOLID" });
    let requests: Vec<Value> = ranges
        .iter()
        .map(|range| {
            json!({
                "updateBorders": {
                    "range": grid_range(range),
                    "top": solid,
                    "bottom": solid,
                    "left": solid,
                    "right": solid,
                    "innerHorizontal": solid,
                    "innerVertical": solid,
                }
            })
        })
        .collect();
    json!({ "requests": requests })
}

fn read_body(range: &CellRange) -> Value {
    json!({
        "dataFilters": [{ "gridRange": grid_range(range) }],
        "majorDimension": MajorDimension::Rows.as_str(),
    })
}

#[async_trait]
impl SpreadsheetService for HttpSheetsClient {
    async fn create_sheet(&self, title: &str) -> Result<SpreadsheetRef, DomainError> {
        let body = json!({ "properties": { "title": title } });
        let response = self.post_json(self.spreadsheets_url(), &body, "create spreadsheet").await?;
        let created: CreatedSpreadsheet = decode(response, "create spreadsheet").await?;
        Ok(SpreadsheetRef {
            id: created.spreadsheet_id,
            url: created.spreadsheet_url,
        })
    }

    async fn delete_sheet(&self, sheet: &SpreadsheetRef) -> Result<(), DomainError> {
        let url = format!("{}/drive/v3/files/{}", self.drive_root, sheet.id);
        self.send(self.client.delete(url), "delete spreadsheet").await?;
        Ok(())
    }

    async fn write_ranges(
        &self,
        sheet: &SpreadsheetRef,
        writes: &[RangeWrite],
    ) -> Result<(), DomainError> {
        let url = format!("{}/{}/values:batchUpdate", self.spreadsheets_url(), sheet.id);
        self.post_json(url, &values_update_body(writes), "write values").await?;
        Ok(())
    }

    async fn draw_borders(
        &self,
        sheet: &SpreadsheetRef,
        ranges: &[CellRange],
    ) -> Result<(), DomainError> {
        let url = format!("{}/{}:batchUpdate", self.spreadsheets_url(), sheet.id);
        self.post_json(url, &borders_body(ranges), "draw borders").await?;
        Ok(())
    }

    async fn read_range(
        &self,
        sheet: &SpreadsheetRef,
        range: &CellRange,
    ) -> Result<Vec<Vec<CellValue>>, DomainError> {
        let url = format!(
            "{}/{}/values:batchGetByDataFilter",
            self.spreadsheets_url(),
            sheet.id
        );
        let response = self.post_json(url, &read_body(range), "read values").await?;
        let batch: BatchGetResponse = decode(response, "read values").await?;

        let [matched] = <[MatchedValueRange; 1]>::try_from(batch.value_ranges).map_err(|ranges| {
            DomainError::Infrastructure(format!(
                "read values returned {} ranges, expected 1",
                ranges.len()
            ))
        })?;
        Ok(matched
            .value_range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(json_to_cell).collect())
            .collect())
    }
}
