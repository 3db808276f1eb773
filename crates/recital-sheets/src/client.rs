//! Google Sheets API client
//!
//! Provides a typed HTTP client for the Sheets API v4 `values` endpoints.
//! Handles authentication, range encoding in request paths and mapping of
//! error responses.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use recital_sheets::client::SheetsClient;
//! use recital_sheets::session::{Credentials, SheetsSession};
//!
//! # async fn example() -> Result<(), recital_sheets::SheetsError> {
//! let session = SheetsSession::new("sheet-id", Credentials::ApiKey("key".into()));
//! let client = SheetsClient::new(session);
//! let title = client.initialize().await?;
//! let rows = client.get_values("Sheet1!A1:H").await?;
//! println!("{title}: {} rows", rows.len());
//! # Ok(())
//! # }
//! ```

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::{
    session::{Credentials, SheetsSession},
    SheetsError,
};

/// Base URL of the Google Sheets API
pub const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";

/// Values are written exactly as given, without formula or date parsing
const VALUE_INPUT_OPTION: &str = "RAW";

// ============================================================================
// Sheets API wire types
// ============================================================================

/// Response of `GET .../values/{range}`
#[derive(Debug, Deserialize)]
struct ValueRangeResponse {
    /// Absent when the range is empty
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Response of `GET /v4/spreadsheets/{id}?fields=properties.title`
#[derive(Debug, Deserialize)]
struct SpreadsheetResponse {
    properties: Option<SpreadsheetProperties>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetProperties {
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Request body for value writes
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeBody<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: &'a [Vec<String>],
}

// ============================================================================
// SheetsClient
// ============================================================================

/// HTTP client for one spreadsheet
pub struct SheetsClient {
    client: Client,
    base_url: String,
    session: SheetsSession,
}

impl SheetsClient {
    /// Creates a client for the session's spreadsheet
    pub fn new(session: SheetsSession) -> Self {
        Self::with_base_url(session, SHEETS_BASE_URL)
    }

    /// Creates a client with a custom base URL (useful for testing)
    pub fn with_base_url(session: SheetsSession, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            session,
        }
    }

    pub fn session(&self) -> &SheetsSession {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds `{base}/v4/spreadsheets/{id}{suffix}/{segments..}`
    ///
    /// Each segment is percent-encoded, so ranges with spaces or quotes in
    /// the sheet name are safe to pass.
    fn url(&self, id_suffix: &str, segments: &[&str]) -> Result<Url, SheetsError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| SheetsError::InvalidUrl(e.to_string()))?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| SheetsError::InvalidUrl(self.base_url.clone()))?;
            path.pop_if_empty()
                .push("v4")
                .push("spreadsheets")
                .push(&format!("{}{id_suffix}", self.session.spreadsheet_id()));
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    /// Creates an authenticated request builder
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match self.session.credentials() {
            Credentials::ApiKey(key) => builder.query(&[("key", key)]),
            Credentials::AccessToken(token) => builder.bearer_auth(token),
        }
    }

    fn ensure_writable(&self) -> Result<(), SheetsError> {
        if self.session.can_write() {
            Ok(())
        } else {
            Err(SheetsError::ReadOnlySession)
        }
    }

    /// Checks that the spreadsheet is reachable with the session's
    /// credentials and returns its title
    pub async fn initialize(&self) -> Result<String, SheetsError> {
        let url = self.url("", &[])?;
        let response = self
            .request(Method::GET, url)
            .query(&[("fields", "properties.title")])
            .send()
            .await?;
        let body: SpreadsheetResponse = check(response, self.session.spreadsheet_id())
            .await?
            .json()
            .await
            .map_err(|e| SheetsError::InvalidResponse(e.to_string()))?;

        let title = body
            .properties
            .and_then(|p| p.title)
            .unwrap_or_default();
        info!(
            spreadsheet_id = self.session.spreadsheet_id(),
            title = %title,
            writable = self.session.can_write(),
            "Connected to spreadsheet"
        );
        Ok(title)
    }

    /// Reads every row of `range`, header included
    ///
    /// Cells are returned as text; trailing empty cells are omitted by the
    /// API, so rows may be shorter than the range.
    pub async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        let url = self.url("", &["values", range])?;
        let response = self.request(Method::GET, url).send().await?;
        let body: ValueRangeResponse = check(response, range)
            .await?
            .json()
            .await
            .map_err(|e| SheetsError::InvalidResponse(e.to_string()))?;

        let rows: Vec<Vec<String>> = body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect();
        debug!(range, rows = rows.len(), "Fetched values");
        Ok(rows)
    }

    /// Overwrites `range` with `rows`
    pub async fn update_values(&self, range: &str, rows: &[Vec<String>]) -> Result<(), SheetsError> {
        self.ensure_writable()?;
        let url = self.url("", &["values", range])?;
        let response = self
            .request(Method::PUT, url)
            .query(&[("valueInputOption", VALUE_INPUT_OPTION)])
            .json(&ValueRangeBody {
                range,
                major_dimension: "ROWS",
                values: rows,
            })
            .send()
            .await?;
        check(response, range).await?;
        debug!(range, rows = rows.len(), "Updated values");
        Ok(())
    }

    /// Appends `rows` after the last row of the table in `range`
    pub async fn append_values(&self, range: &str, rows: &[Vec<String>]) -> Result<(), SheetsError> {
        self.ensure_writable()?;
        let url = self.url("", &["values", &format!("{range}:append")])?;
        let response = self
            .request(Method::POST, url)
            .query(&[("valueInputOption", VALUE_INPUT_OPTION)])
            .json(&ValueRangeBody {
                range,
                major_dimension: "ROWS",
                values: rows,
            })
            .send()
            .await?;
        check(response, range).await?;
        debug!(range, rows = rows.len(), "Appended values");
        Ok(())
    }

    /// Clears the values of `range`, leaving the rows in place
    pub async fn clear_values(&self, range: &str) -> Result<(), SheetsError> {
        self.ensure_writable()?;
        let url = self.url("", &["values", &format!("{range}:clear")])?;
        let response = self
            .request(Method::POST, url)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        check(response, range).await?;
        debug!(range, "Cleared values");
        Ok(())
    }

    /// Adds a sheet tab named `title`
    pub async fn add_sheet(&self, title: &str) -> Result<(), SheetsError> {
        self.ensure_writable()?;
        let url = self.url(":batchUpdate", &[])?;
        let response = self
            .request(Method::POST, url)
            .json(&serde_json::json!({
                "requests": [{ "addSheet": { "properties": { "title": title } } }]
            }))
            .send()
            .await?;
        check(response, title).await?;
        info!(sheet = title, "Added sheet");
        Ok(())
    }
}

/// Maps a non-success response to a [`SheetsError`]
async fn check(response: Response, target: &str) -> Result<Response, SheetsError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SheetsError::Unauthorized(message),
        StatusCode::NOT_FOUND => SheetsError::SpreadsheetNotFound(target.to_string()),
        StatusCode::BAD_REQUEST if message.contains("Unable to parse range") => {
            SheetsError::RangeNotFound(target.to_string())
        }
        _ => SheetsError::Status {
            status: status.as_u16(),
            message,
        },
    })
}

/// Text of a cell as the spreadsheet displays it
fn cell_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        other => other.to_string(),
    }
}
