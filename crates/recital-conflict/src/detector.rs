//! Quick-change conflict detection
//!
//! A dancer who appears in two numbers that follow each other in the
//! running order has no time to change costume between them. Only direct
//! neighbours in the chronologically sorted schedule are compared: a dancer
//! in numbers 1 and 3 with an unrelated number 2 in between is fine.

use std::collections::{HashMap, HashSet};

use recital_core::domain::{Conflict, Dancer, DancerId, Event, UNKNOWN_DANCER};
use tracing::{debug, trace};

use crate::timestamp::ScheduleKey;

/// Detects quick-change conflicts in a schedule
pub struct ConflictDetector;

impl ConflictDetector {
    /// Scans `events` in running order and returns one conflict per dancer
    /// shared by each pair of consecutive events
    ///
    /// Events are ordered by date and time with a stable sort, so events at
    /// the same instant keep their input order. Events whose date or time
    /// cannot be parsed are placed after all others. The roster is only used
    /// to resolve display names; dancers missing from it are reported as
    /// [`UNKNOWN_DANCER`].
    ///
    /// Conflicts are returned grouped by pair (earliest pair first) and, within
    /// a pair, in the order the dancers are listed on the earlier event. A
    /// dancer listed twice on the earlier event is reported twice.
    pub fn detect(events: &[Event], dancers: &[Dancer]) -> Vec<Conflict> {
        if events.len() < 2 {
            return Vec::new();
        }

        let running_order = running_order(events);
        let names = roster_names(dancers);

        let mut conflicts = Vec::new();
        for pair in running_order.windows(2) {
            let (earlier, later) = (pair[0], pair[1]);
            let in_later: HashSet<&DancerId> = later.assigned_dancers.iter().collect();

            for dancer_id in earlier
                .assigned_dancers
                .iter()
                .filter(|id| in_later.contains(id))
            {
                let name = names.get(dancer_id).copied().unwrap_or(UNKNOWN_DANCER);
                let conflict = Conflict::quick_change(dancer_id, name, earlier, later);
                trace!(
                    conflict_id = %conflict.id(),
                    dancer_id = %dancer_id,
                    "Quick change detected"
                );
                conflicts.push(conflict);
            }
        }

        debug!(
            events = events.len(),
            conflicts = conflicts.len(),
            "Conflict scan complete"
        );
        conflicts
    }
}

/// Shorthand for [`ConflictDetector::detect`]
pub fn detect_conflicts(events: &[Event], dancers: &[Dancer]) -> Vec<Conflict> {
    ConflictDetector::detect(events, dancers)
}

/// Events sorted by start, ties and unparseable events in input order
fn running_order(events: &[Event]) -> Vec<&Event> {
    let mut keyed: Vec<(ScheduleKey, &Event)> =
        events.iter().map(|e| (ScheduleKey::of(e), e)).collect();

    let unparseable = keyed.iter().filter(|(k, _)| !k.is_valid()).count();
    if unparseable > 0 {
        debug!(
            count = unparseable,
            "Events with unparseable date/time placed at the end of the running order"
        );
    }

    // `sort_by_key` is stable
    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, e)| e).collect()
}

/// Display name per dancer; the first roster entry wins for repeated ids
fn roster_names(dancers: &[Dancer]) -> HashMap<&DancerId, &str> {
    let mut names = HashMap::with_capacity(dancers.len());
    for dancer in dancers {
        names.entry(&dancer.id).or_insert(dancer.name.as_str());
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use recital_core::domain::{EventId, Severity};

    fn did(id: &str) -> DancerId {
        DancerId::new(id).expect("valid dancer id")
    }

    fn event(id: &str, date: &str, time: Option<&str>, dancers: &[&str]) -> Event {
        let mut event = Event::new(
            EventId::new(id).expect("valid event id"),
            format!("{id}'s title"),
            date,
        )
        .with_dancers(dancers.iter().map(|d| did(d)));
        event.time = time.map(str::to_string);
        event
    }

    fn roster() -> Vec<Dancer> {
        vec![
            Dancer::new(did("d1"), "Alice"),
            Dancer::new(did("d2"), "Bob"),
            Dancer::new(did("d3"), "Carol"),
        ]
    }

    fn ids(conflicts: &[Conflict]) -> Vec<&str> {
        conflicts.iter().map(|c| c.id().as_str()).collect()
    }

    fn scenario_one() -> Vec<Event> {
        vec![
            event("e1", "2024-06-15", Some("18:00"), &["d1", "d2"]),
            event("e2", "2024-06-15", Some("18:05"), &["d2", "d3"]),
        ]
    }

    #[test]
    fn test_shared_dancer_in_consecutive_events() {
        let conflicts = detect_conflicts(&scenario_one(), &roster());

        assert_eq!(conflicts.len(), 1);
        let conflict = &conflicts[0];
        assert_eq!(conflict.id().as_str(), "d2-e1-e2");
        assert_eq!(conflict.dancer_id(), &did("d2"));
        assert_eq!(
            conflict.description(),
            r#"Quick Change: Bob is in "e1's title" and "e2's title" (Consecutive)"#
        );
        assert_eq!(conflict.severity(), Severity::High);
    }

    #[test]
    fn test_reverse_input_order_yields_same_conflicts() {
        let mut reversed = scenario_one();
        reversed.reverse();

        assert_eq!(
            detect_conflicts(&reversed, &roster()),
            detect_conflicts(&scenario_one(), &roster())
        );
    }

    #[test]
    fn test_fewer_than_two_events_yield_nothing() {
        assert!(detect_conflicts(&[], &roster()).is_empty());

        let single = vec![event("e1", "2024-06-15", Some("18:00"), &["d1", "d1"])];
        assert!(detect_conflicts(&single, &roster()).is_empty());
    }

    #[test]
    fn test_identical_timestamps_keep_input_order() {
        let events = vec![
            event("b", "2024-06-15", Some("18:00"), &["d1"]),
            event("a", "2024-06-15", Some("18:00"), &["d1"]),
        ];

        assert_eq!(ids(&detect_conflicts(&events, &roster())), vec!["d1-b-a"]);
    }

    #[test]
    fn test_unknown_dancer_is_still_reported() {
        let events = vec![
            event("e1", "2024-06-15", Some("18:00"), &["d99"]),
            event("e2", "2024-06-15", Some("18:05"), &["d99"]),
        ];

        let conflicts = detect_conflicts(&events, &roster());
        assert_eq!(conflicts.len(), 1);
        assert!(conflicts[0].description().contains("Unknown Dancer"));
        assert_eq!(conflicts[0].id().as_str(), "d99-e1-e2");
    }

    #[test]
    fn test_missing_time_sorts_as_midnight() {
        // Listed last, but without a time it opens the day.
        let events = vec![
            event("late", "2024-06-15", Some("09:00"), &["d1"]),
            event("early", "2024-06-15", Some("00:30"), &["d2"]),
            event("untimed", "2024-06-15", None, &["d1", "d2"]),
        ];

        // untimed (00:00) -> early (00:30) -> late (09:00)
        assert_eq!(ids(&detect_conflicts(&events, &roster())), vec!["d2-untimed-early"]);

        let mut blank = events.clone();
        blank[2].time = Some(String::new());
        assert_eq!(ids(&detect_conflicts(&blank, &roster())), vec!["d2-untimed-early"]);
    }

    #[test]
    fn test_untimed_ties_with_explicit_midnight() {
        let events = vec![
            event("midnight", "2024-06-15", Some("00:00"), &["d1"]),
            event("untimed", "2024-06-15", None, &["d1"]),
        ];
        assert_eq!(
            ids(&detect_conflicts(&events, &roster())),
            vec!["d1-midnight-untimed"]
        );
    }

    #[test]
    fn test_disjoint_neighbours_yield_nothing() {
        let events = vec![
            event("e1", "2024-06-15", Some("18:00"), &["d1"]),
            event("e2", "2024-06-15", Some("18:05"), &["d2"]),
            event("e3", "2024-06-15", Some("18:10"), &["d3"]),
            event("e4", "2024-06-16", Some("18:00"), &["d1"]),
        ];
        assert!(detect_conflicts(&events, &roster()).is_empty());
    }

    #[test]
    fn test_only_adjacent_pairs_are_compared() {
        let events = vec![
            event("a", "2024-06-15", Some("18:00"), &["d1"]),
            event("b", "2024-06-15", Some("18:10"), &["d2"]),
            event("c", "2024-06-15", Some("18:20"), &["d1"]),
        ];
        assert!(detect_conflicts(&events, &roster()).is_empty());
    }

    #[test]
    fn test_three_consecutive_events_yield_two_conflicts() {
        let events = vec![
            event("a", "2024-06-15", Some("18:00"), &["d1"]),
            event("b", "2024-06-15", Some("18:10"), &["d1"]),
            event("c", "2024-06-15", Some("18:20"), &["d1"]),
        ];
        assert_eq!(
            ids(&detect_conflicts(&events, &roster())),
            vec!["d1-a-b", "d1-b-c"]
        );
    }

    #[test]
    fn test_conflicts_follow_earlier_event_listing_order() {
        let events = vec![
            event("a", "2024-06-15", Some("18:00"), &["d3", "d1", "d2"]),
            event("b", "2024-06-15", Some("18:10"), &["d2", "d1", "d3"]),
        ];
        assert_eq!(
            ids(&detect_conflicts(&events, &roster())),
            vec!["d3-a-b", "d1-a-b", "d2-a-b"]
        );
    }

    #[test]
    fn test_events_on_different_days_are_still_adjacent() {
        let events = vec![
            event("fri", "2024-06-14", Some("20:00"), &["d1"]),
            event("sat", "2024-06-15", Some("10:00"), &["d1"]),
        ];
        assert_eq!(ids(&detect_conflicts(&events, &roster())), vec!["d1-fri-sat"]);
    }

    #[test]
    fn test_unparseable_dates_sort_last_in_input_order() {
        let events = vec![
            event("bad1", "bad-date", Some("18:00"), &["d1"]),
            event("ok", "2024-06-15", Some("23:00"), &["d1", "d2"]),
            event("bad2", "2024-06-15", Some("not a time"), &["d2", "d1"]),
        ];

        // ok -> bad1 -> bad2
        assert_eq!(
            ids(&detect_conflicts(&events, &roster())),
            vec!["d1-ok-bad1", "d1-bad1-bad2"]
        );
    }

    #[test]
    fn test_missing_assignments_contribute_nothing() {
        let events: Vec<Event> = serde_json::from_str(
            r#"[
                {"id": "e1", "title": "A", "date": "2024-06-15", "time": "18:00"},
                {"id": "e2", "title": "B", "date": "2024-06-15", "time": "18:05", "assignedDancers": ["d1"]}
            ]"#,
        )
        .unwrap();
        assert!(detect_conflicts(&events, &roster()).is_empty());
    }

    #[test]
    fn test_duplicate_assignment_in_earlier_event_is_reported_per_listing() {
        let events = vec![
            event("a", "2024-06-15", Some("18:00"), &["d1", "d1"]),
            event("b", "2024-06-15", Some("18:10"), &["d1"]),
        ];
        assert_eq!(
            ids(&detect_conflicts(&events, &roster())),
            vec!["d1-a-b", "d1-a-b"]
        );
    }

    #[test]
    fn test_first_roster_entry_wins_for_repeated_ids() {
        let mut dancers = roster();
        dancers.push(Dancer::new(did("d2"), "Robert"));

        let conflicts = detect_conflicts(&scenario_one(), &dancers);
        assert!(conflicts[0].description().contains("Bob"));
    }

    #[test]
    fn test_detection_is_idempotent_and_ids_unique() {
        let events = vec![
            event("a", "2024-06-15", Some("18:00"), &["d1", "d2", "d3"]),
            event("b", "2024-06-15", Some("18:10"), &["d1", "d2"]),
            event("c", "2024-06-15", Some("18:20"), &["d2", "d3"]),
            event("d", "2024-06-15", None, &["d3"]),
        ];
        let dancers = roster();

        let first = detect_conflicts(&events, &dancers);
        let second = detect_conflicts(&events, &dancers);
        assert_eq!(first, second);

        let unique: HashSet<&str> = first.iter().map(|c| c.id().as_str()).collect();
        assert_eq!(unique.len(), first.len());
    }

    #[test]
    fn test_input_permutation_gives_same_conflict_set() {
        let events = vec![
            event("a", "2024-06-15", Some("18:00"), &["d1", "d2"]),
            event("b", "2024-06-15", Some("18:10"), &["d1", "d3"]),
            event("c", "2024-06-15", Some("18:20"), &["d3", "d2"]),
            event("d", "2024-06-15", Some("18:30"), &["d2"]),
        ];
        let expected: HashSet<String> = detect_conflicts(&events, &roster())
            .iter()
            .map(|c| c.id().to_string())
            .collect();

        for permutation in [[3, 1, 0, 2], [2, 3, 1, 0], [1, 0, 3, 2]] {
            let shuffled: Vec<Event> = permutation.iter().map(|&i| events[i].clone()).collect();
            let got: HashSet<String> = detect_conflicts(&shuffled, &roster())
                .iter()
                .map(|c| c.id().to_string())
                .collect();
            assert_eq!(got, expected, "permutation {permutation:?}");
        }
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let events = vec![
            event("b", "2024-06-15", Some("18:10"), &["d1"]),
            event("a", "2024-06-15", Some("18:00"), &["d1"]),
        ];
        let before = events.clone();
        let _ = detect_conflicts(&events, &roster());
        assert_eq!(events, before);
    }
}
