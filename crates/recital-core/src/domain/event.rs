//! Scheduled performance event
//!
//! An event is one number in the show: a title, the calendar date and
//! wall-clock time it starts, and the dancers assigned to it. Date and time
//! are kept exactly as the store provided them; ordering is derived by the
//! conflict engine, which tolerates malformed values.

use serde::{Deserialize, Deserializer, Serialize};

use super::newtypes::{DancerId, EventId, RecitalId, RowIndex};

/// A scheduled performance slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    #[serde(default)]
    pub title: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Wall-clock start, `HH:MM` (24-hour); absent or empty means midnight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Assigned dancers; order carries no meaning and duplicates are kept
    #[serde(default, deserialize_with = "null_as_empty")]
    pub assigned_dancers: Vec<DancerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recital_id: Option<RecitalId>,
    /// Sheet row of the persisted record; `None` for unsaved events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<RowIndex>,
}

impl Event {
    /// Creates an event with no time and no assigned dancers
    pub fn new(id: EventId, title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            date: date.into(),
            time: None,
            assigned_dancers: Vec::new(),
            recital_id: None,
            row_index: None,
        }
    }

    pub fn at(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_dancers(mut self, dancers: impl IntoIterator<Item = DancerId>) -> Self {
        self.assigned_dancers = dancers.into_iter().collect();
        self
    }

    pub fn with_recital(mut self, recital_id: RecitalId) -> Self {
        self.recital_id = Some(recital_id);
        self
    }

    pub fn with_row_index(mut self, row: RowIndex) -> Self {
        self.row_index = Some(row);
        self
    }

    /// Returns true if `dancer` is assigned to this event
    pub fn features(&self, dancer: &DancerId) -> bool {
        self.assigned_dancers.contains(dancer)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<DancerId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<DancerId>>::deserialize(deserializer)?.unwrap_or_default())
}
