//! Per-dancer conflict badges
//!
//! The roster view marks every dancer involved in at least one quick change
//! with the number of conflicts they appear in.

use std::collections::{BTreeMap, HashSet};

use recital_core::domain::{Conflict, Dancer, DancerId};
use serde::Serialize;

/// Warning badge for one dancer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DancerBadge {
    pub dancer_id: DancerId,
    pub name: String,
    pub conflict_count: usize,
}

impl DancerBadge {
    /// Tooltip text shown on the badge
    pub fn tooltip(&self) -> String {
        format!(
            "This dancer has {} scheduling conflict{}",
            self.conflict_count,
            if self.conflict_count == 1 { "" } else { "s" }
        )
    }
}

/// Number of conflicts per dancer
pub fn conflict_counts(conflicts: &[Conflict]) -> BTreeMap<DancerId, usize> {
    let mut counts = BTreeMap::new();
    for conflict in conflicts {
        *counts.entry(conflict.dancer_id().clone()).or_insert(0) += 1;
    }
    counts
}

/// Returns true if `dancer` appears in any conflict
pub fn has_conflicts(conflicts: &[Conflict], dancer: &DancerId) -> bool {
    conflicts.iter().any(|c| c.dancer_id() == dancer)
}

/// Conflicts whose dancer is on `roster`, in their original order
pub fn conflicts_for_roster<'a>(conflicts: &'a [Conflict], roster: &[Dancer]) -> Vec<&'a Conflict> {
    let members: HashSet<&DancerId> = roster.iter().map(|d| &d.id).collect();
    conflicts
        .iter()
        .filter(|c| members.contains(c.dancer_id()))
        .collect()
}

/// Badges for the dancers on `roster` that have conflicts, in roster order
pub fn badges(conflicts: &[Conflict], roster: &[Dancer]) -> Vec<DancerBadge> {
    let counts = conflict_counts(conflicts);
    let mut seen = HashSet::new();
    roster
        .iter()
        .filter(|d| seen.insert(&d.id))
        .filter_map(|d| {
            counts.get(&d.id).map(|&count| DancerBadge {
                dancer_id: d.id.clone(),
                name: d.name.clone(),
                conflict_count: count,
            })
        })
        .collect()
}
