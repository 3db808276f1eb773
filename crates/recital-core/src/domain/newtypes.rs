//! Domain newtypes with validation
//!
//! This module provides strongly-typed wrappers for record identifiers and
//! spreadsheet row positions. Each newtype ensures data validity at
//! construction time.
//!
//! Record identifiers come from spreadsheets and hand-written snapshot files,
//! where the same column may hold `7` or `"d7"`. Both forms are accepted on
//! deserialization and normalized to their textual representation.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

// ============================================================================
// Record identifiers
// ============================================================================

/// Identifier as it may appear in external data: text or a bare integer
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "RawId", into = "String")]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Create a new ", $label, ", trimming surrounding whitespace")]
            ///
            /// # Errors
            /// Returns error if the identifier is empty
            pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
                let id = id.into();
                let trimmed = id.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::InvalidId(format!(
                        "{} cannot be empty",
                        $label
                    )));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Get the inner string reference
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl TryFrom<RawId> for $name {
            type Error = DomainError;

            fn try_from(raw: RawId) -> Result<Self, Self::Error> {
                Self::new(String::from(raw))
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                Self(n.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

record_id!(
    /// Identifier of a dancer, stable across sessions
    DancerId,
    "DancerId"
);

record_id!(
    /// Identifier of a scheduled performance event
    EventId,
    "EventId"
);

record_id!(
    /// Identifier of a recital (a show with its own schedule)
    RecitalId,
    "RecitalId"
);

impl RecitalId {
    /// The recital that untagged records belong to
    #[must_use]
    pub fn default_recital() -> Self {
        Self(super::recital::DEFAULT_RECITAL_ID.to_string())
    }
}

// ============================================================================
// ConflictId
// ============================================================================

/// Identifier of a derived quick-change conflict
///
/// Composed as `{dancer}-{earlier event}-{later event}`, so the same
/// dancer/event pair always yields the same identifier across recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConflictId(String);

impl ConflictId {
    /// Compose the identifier for a dancer booked in two adjacent events
    #[must_use]
    pub fn compose(dancer: &DancerId, earlier: &EventId, later: &EventId) -> Self {
        Self(format!("{dancer}-{earlier}-{later}"))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ConflictId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// RowIndex
// ============================================================================

/// 1-based spreadsheet row holding a persisted record
///
/// Row 1 is always the header row, so data rows start at 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct RowIndex(u32);

impl RowIndex {
    /// First row that can hold data
    pub const FIRST_DATA_ROW: u32 = 2;

    /// Create a RowIndex
    ///
    /// # Errors
    /// Returns error if the row is the header row or row 0
    pub fn new(row: u32) -> Result<Self, DomainError> {
        if row < Self::FIRST_DATA_ROW {
            return Err(DomainError::InvalidRowIndex(format!(
                "row {row} is not a data row (data starts at row {})",
                Self::FIRST_DATA_ROW
            )));
        }
        Ok(Self(row))
    }

    /// Row of the `offset`-th data record (0-based) below the header
    #[must_use]
    pub fn from_data_offset(offset: usize) -> Self {
        let offset = u32::try_from(offset).unwrap_or(u32::MAX - Self::FIRST_DATA_ROW);
        Self(offset.saturating_add(Self::FIRST_DATA_ROW))
    }

    /// Get the row number
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Display for RowIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for RowIndex {
    type Error = DomainError;

    fn try_from(row: u32) -> Result<Self, Self::Error> {
        Self::new(row)
    }
}

impl From<RowIndex> for u32 {
    fn from(row: RowIndex) -> Self {
        row.0
    }
}
