//! Conflict domain entity
//!
//! A conflict is derived data: it is recomputed from the schedule and the
//! roster whenever either changes, and is never persisted or mutated.

use serde::{Deserialize, Serialize};

use super::event::Event;
use super::newtypes::{ConflictId, DancerId};

/// Name used in descriptions when a dancer id is missing from the roster
pub const UNKNOWN_DANCER: &str = "Unknown Dancer";

/// How urgently a conflict needs attention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::High => write!(f, "high"),
        }
    }
}

/// A dancer booked in two events that follow each other in the schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    id: ConflictId,
    dancer_id: DancerId,
    description: String,
    severity: Severity,
}

impl Conflict {
    /// Builds the quick-change conflict for `dancer_id` between two adjacent
    /// events
    ///
    /// # Example
    ///
    /// ```
    /// use recital_core::domain::{Conflict, DancerId, Event, EventId};
    ///
    /// let first = Event::new(EventId::new("e1").unwrap(), "Swan Lake", "2024-06-15");
    /// let second = Event::new(EventId::new("e2").unwrap(), "Tap Finale", "2024-06-15");
    /// let dancer = DancerId::new("d2").unwrap();
    ///
    /// let conflict = Conflict::quick_change(&dancer, "Bob", &first, &second);
    /// assert_eq!(conflict.id().as_str(), "d2-e1-e2");
    /// assert_eq!(
    ///     conflict.description(),
    ///     r#"Quick Change: Bob is in "Swan Lake" and "Tap Finale" (Consecutive)"#
    /// );
    /// ```
    pub fn quick_change(
        dancer_id: &DancerId,
        dancer_name: &str,
        earlier: &Event,
        later: &Event,
    ) -> Self {
        Self {
            id: ConflictId::compose(dancer_id, &earlier.id, &later.id),
            dancer_id: dancer_id.clone(),
            description: format!(
                "Quick Change: {dancer_name} is in \"{}\" and \"{}\" (Consecutive)",
                earlier.title, later.title
            ),
            severity: Severity::High,
        }
    }

    /// Returns the conflict ID
    pub fn id(&self) -> &ConflictId {
        &self.id
    }

    /// Returns the double-booked dancer
    pub fn dancer_id(&self) -> &DancerId {
        &self.dancer_id
    }

    /// Returns the human-readable message
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the severity
    pub fn severity(&self) -> Severity {
        self.severity
    }
}
