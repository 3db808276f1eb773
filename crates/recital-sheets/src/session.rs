//! Spreadsheet session
//!
//! A session pairs the spreadsheet id with the credentials used to reach it.
//! It is created by the caller and handed to [`crate::client::SheetsClient`];
//! nothing about it is global.

use std::fmt;

use recital_core::config::Config;
use tracing::debug;

use crate::SheetsError;

/// How requests are authenticated
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Public API key, sent as the `key` query parameter. Read-only.
    ApiKey(String),
    /// OAuth access token, sent as a bearer token. Read/write.
    AccessToken(String),
}

impl Credentials {
    /// Returns true if these credentials can modify the spreadsheet
    pub fn can_write(&self) -> bool {
        matches!(self, Self::AccessToken(_))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(***)"),
            Self::AccessToken(_) => f.write_str("AccessToken(***)"),
        }
    }
}

/// A spreadsheet together with the credentials used to access it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetsSession {
    spreadsheet_id: String,
    credentials: Credentials,
}

impl SheetsSession {
    pub fn new(spreadsheet_id: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            credentials,
        }
    }

    /// Builds a session from configuration and the environment
    ///
    /// An access token found in the variable named by
    /// `auth.access_token_env` takes precedence over `auth.api_key`.
    pub fn from_config(config: &Config) -> Result<Self, SheetsError> {
        let token = std::env::var(&config.auth.access_token_env).ok();
        Self::resolve(config, token)
    }

    /// Builds a session from configuration and an explicit access token
    pub fn resolve(config: &Config, access_token: Option<String>) -> Result<Self, SheetsError> {
        let spreadsheet_id = config
            .sheets
            .spreadsheet_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(SheetsError::MissingSpreadsheet)?;

        let token = access_token.filter(|t| !t.trim().is_empty());
        let api_key = config.auth.api_key.clone().filter(|k| !k.trim().is_empty());

        let credentials = match (token, api_key) {
            (Some(token), _) => Credentials::AccessToken(token),
            (None, Some(key)) => Credentials::ApiKey(key),
            (None, None) => return Err(SheetsError::MissingCredentials),
        };

        debug!(
            spreadsheet_id,
            writable = credentials.can_write(),
            "Resolved spreadsheet session"
        );
        Ok(Self::new(spreadsheet_id, credentials))
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns true if this session may write to the spreadsheet
    pub fn can_write(&self) -> bool {
        self.credentials.can_write()
    }
}
