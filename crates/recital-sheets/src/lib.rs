//! Recital Sheets - Google Sheets storage for the recital planner
//!
//! Provides:
//! - An explicit, caller-owned spreadsheet session (API key or OAuth token)
//! - A typed HTTP client for the Sheets API v4 values endpoints
//! - Column mapping tables that validate rows at the boundary
//! - [`store::SheetsStore`], the `IRecitalStore` adapter
//!
//! ## Modules
//!
//! - [`session`] - Spreadsheet id plus credentials
//! - [`client`] - Sheets API HTTP client
//! - [`schema`] - Row schemas for dancers, recitals and events
//! - [`store`] - Store port implementation

pub mod client;
pub mod schema;
pub mod session;
pub mod store;

use recital_core::domain::StoreError;
use thiserror::Error;

pub use schema::RowError;

/// Errors that can occur when talking to the Google Sheets API
#[derive(Debug, Error)]
pub enum SheetsError {
    /// No spreadsheet id was configured
    #[error("no spreadsheet configured; set sheets.spreadsheet_id")]
    MissingSpreadsheet,

    /// Neither an API key nor an access token is available
    #[error("no credentials configured; set auth.api_key or the access token variable")]
    MissingCredentials,

    /// A write was attempted through an API-key session
    #[error("session is read-only; writes need an OAuth access token")]
    ReadOnlySession,

    /// Credentials were rejected (401/403)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The spreadsheet does not exist (404)
    #[error("Spreadsheet not found: {0}")]
    SpreadsheetNotFound(String),

    /// The range names a sheet tab that does not exist
    #[error("Range not found: {0}")]
    RangeNotFound(String),

    /// Any other non-success status
    #[error("Sheets API returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message from the response body, if any
        message: String,
    },

    /// The base URL cannot address API paths
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// A network-level error occurred
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The API response could not be parsed or was malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl SheetsError {
    /// Returns true for failures that may succeed when retried later
    pub fn is_transient(&self) -> bool {
        match self {
            Self::NetworkError(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<SheetsError> for StoreError {
    fn from(err: SheetsError) -> Self {
        match err {
            SheetsError::ReadOnlySession => StoreError::ReadOnly,
            SheetsError::SpreadsheetNotFound(what) | SheetsError::RangeNotFound(what) => {
                StoreError::NotFound(what)
            }
            SheetsError::Unauthorized(msg) => StoreError::Rejected(msg),
            ref e if e.is_transient() => StoreError::Unavailable(e.to_string()),
            SheetsError::Status { status, message } => {
                StoreError::Rejected(format!("{status}: {message}"))
            }
            other => StoreError::Other(anyhow::Error::new(other)),
        }
    }
}
