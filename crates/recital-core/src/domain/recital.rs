//! Recital metadata
//!
//! A studio may run several recitals, each with its own schedule sheet.
//! Records created before recitals existed carry no recital id and are
//! treated as part of the default recital.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::newtypes::RecitalId;

/// Recital that untagged dancers and events belong to
pub const DEFAULT_RECITAL_ID: &str = "recital-1";

/// A recital (one show with its own running order)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recital {
    pub id: RecitalId,
    pub name: String,
    /// Show date, `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub active: bool,
}

impl Recital {
    /// The recital created when a store has none yet
    pub fn default_for(date: NaiveDate) -> Self {
        Self {
            id: default_recital_id(),
            name: "Spring Showcase".to_string(),
            date: date.format("%Y-%m-%d").to_string(),
            location: "Main Theater".to_string(),
            school: "Dance Studio".to_string(),
            theme: String::new(),
            active: true,
        }
    }

    /// Picks the recital to show first: the first active one, otherwise the
    /// first one listed
    pub fn pick_initial(recitals: &[Recital]) -> Option<&Recital> {
        recitals.iter().find(|r| r.active).or_else(|| recitals.first())
    }
}

/// The id of [`DEFAULT_RECITAL_ID`] as a typed identifier
pub fn default_recital_id() -> RecitalId {
    RecitalId::default_recital()
}

/// Returns true if a record tagged with `tag` belongs to `recital`
///
/// Untagged records belong to the default recital only.
pub fn belongs_to(tag: Option<&RecitalId>, recital: &RecitalId) -> bool {
    match tag {
        Some(tag) => tag == recital,
        None => recital.as_str() == DEFAULT_RECITAL_ID,
    }
}
