//! Dancer domain entity
//!
//! A dancer carries a display name plus the attributes the dashboard edits:
//! costume measurements, role and backstage check-in status. Conflict
//! detection only ever reads `id` and `name`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;
use super::newtypes::{DancerId, RecitalId, RowIndex};

/// Role assigned when the store does not provide one
pub const DEFAULT_ROLE: &str = "Dancer";

/// Backstage readiness of a dancer during the show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckInStatus {
    #[serde(rename = "Not Ready")]
    NotReady,
    #[serde(rename = "Dressed")]
    Dressed,
    #[serde(rename = "In Wings")]
    InWings,
}

impl CheckInStatus {
    /// All statuses in backstage order
    pub const ALL: [CheckInStatus; 3] = [Self::NotReady, Self::Dressed, Self::InWings];

    /// Label as stored in the spreadsheet
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotReady => "Not Ready",
            Self::Dressed => "Dressed",
            Self::InWings => "In Wings",
        }
    }
}

impl fmt::Display for CheckInStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CheckInStatus {
    type Err = DomainError;

    /// Accepts the stored labels as well as `not_ready` / `in-wings` style
    /// spellings, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "notready" => Ok(Self::NotReady),
            "dressed" => Ok(Self::Dressed),
            "inwings" => Ok(Self::InWings),
            _ => Err(DomainError::InvalidCheckInStatus(s.to_string())),
        }
    }
}

/// Costume measurements in centimetres
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub girth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chest: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hips: Option<f64>,
}

impl Measurements {
    /// Returns true when no measurement has been taken yet
    pub fn is_empty(&self) -> bool {
        self.girth.is_none() && self.chest.is_none() && self.waist.is_none() && self.hips.is_none()
    }
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

/// A dancer on the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dancer {
    pub id: DancerId,
    pub name: String,
    #[serde(flatten)]
    pub measurements: Measurements,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_status: Option<CheckInStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recital_id: Option<RecitalId>,
    /// Sheet row of the persisted record; `None` for local-only dancers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<RowIndex>,
}

impl Dancer {
    /// Creates a dancer with no measurements, the default role and no
    /// check-in status
    pub fn new(id: DancerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            measurements: Measurements::default(),
            role: default_role(),
            check_in_status: None,
            recital_id: None,
            row_index: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_measurements(mut self, measurements: Measurements) -> Self {
        self.measurements = measurements;
        self
    }

    pub fn with_row_index(mut self, row: RowIndex) -> Self {
        self.row_index = Some(row);
        self
    }

    pub fn with_recital(mut self, recital_id: RecitalId) -> Self {
        self.recital_id = Some(recital_id);
        self
    }
}
