//! Recital board use case - keep the schedule, roster and conflicts in step
//!
//! The board owns the working copy of the current recital. Every edit is
//! applied locally first and conflicts are recomputed immediately; the store
//! write follows, and if it fails the board restores the state it had before
//! the edit.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use recital_core::{
    domain::{
        recital::belongs_to, CheckInStatus, Conflict, Dancer, DancerId, Event, EventId,
        Measurements, Recital, RecitalId, StoreError,
    },
    ports::{IRecitalStore, WriteOutcome},
};

use crate::{
    badges::{self, DancerBadge},
    detector::detect_conflicts,
    error::BoardError,
};

/// State restored when a write fails
struct Snapshot {
    dancers: Vec<Dancer>,
    events: Vec<Event>,
}

/// Working copy of one recital with its derived conflicts
pub struct RecitalBoard {
    store: Arc<dyn IRecitalStore>,
    recitals: Vec<Recital>,
    current: Option<RecitalId>,
    dancers: Vec<Dancer>,
    events: Vec<Event>,
    conflicts: Vec<Conflict>,
}

impl RecitalBoard {
    pub fn new(store: Arc<dyn IRecitalStore>) -> Self {
        Self {
            store,
            recitals: Vec::new(),
            current: None,
            dancers: Vec::new(),
            events: Vec::new(),
            conflicts: Vec::new(),
        }
    }

    // --- Loading ---

    /// Loads recitals, the roster and the initial recital's schedule
    pub async fn load(&mut self) -> Result<(), BoardError> {
        self.load_on(Local::now().date_naive()).await
    }

    /// Same as [`RecitalBoard::load`], dating a newly created default
    /// recital `today`
    ///
    /// The first active recital is selected, otherwise the first listed. A
    /// store without recitals gets the default one; if that write fails the
    /// board still uses it locally.
    pub async fn load_on(&mut self, today: NaiveDate) -> Result<(), BoardError> {
        let mut recitals = self.store.fetch_recitals().await?;

        if recitals.is_empty() {
            let default = Recital::default_for(today);
            warn!(recital_id = %default.id, "No recitals found, creating default recital");
            if let Err(e) = self.store.create_recital(&default).await {
                warn!(error = %e, "Failed to persist default recital, keeping it locally");
            }
            recitals.push(default);
        }

        let current = Recital::pick_initial(&recitals)
            .map(|r| r.id.clone())
            .ok_or(BoardError::NoRecitalSelected)?;

        self.dancers = self.store.fetch_dancers().await?;
        self.events = self.fetch_schedule(&current).await?;
        self.recitals = recitals;
        self.current = Some(current);
        self.recompute();

        info!(
            recitals = self.recitals.len(),
            dancers = self.dancers.len(),
            events = self.events.len(),
            conflicts = self.conflicts.len(),
            "Recital board loaded"
        );
        Ok(())
    }

    /// Switches to another recital and loads its schedule
    ///
    /// On failure the board keeps showing the previous recital.
    pub async fn select_recital(&mut self, recital: RecitalId) -> Result<(), BoardError> {
        let events = self.fetch_schedule(&recital).await?;
        self.events = events;
        self.current = Some(recital);
        self.recompute();
        Ok(())
    }

    /// A recital whose schedule sheet does not exist yet has no events
    async fn fetch_schedule(&self, recital: &RecitalId) -> Result<Vec<Event>, StoreError> {
        match self.store.fetch_events(recital).await {
            Ok(events) => Ok(events),
            Err(StoreError::NotFound(what)) => {
                warn!(
                    recital_id = %recital,
                    missing = %what,
                    "Schedule not found; it will be created with the first event"
                );
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    // --- Accessors ---

    pub fn recitals(&self) -> &[Recital] {
        &self.recitals
    }

    pub fn current_recital(&self) -> Option<&RecitalId> {
        self.current.as_ref()
    }

    /// Every dancer known to the store
    pub fn dancers(&self) -> &[Dancer] {
        &self.dancers
    }

    /// Dancers taking part in the current recital
    pub fn roster(&self) -> Vec<&Dancer> {
        match &self.current {
            Some(current) => self
                .dancers
                .iter()
                .filter(|d| belongs_to(d.recital_id.as_ref(), current))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Conflicts of the current schedule, in detection order
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// Conflict badges for the current recital's roster
    pub fn badges(&self) -> Vec<DancerBadge> {
        let roster: Vec<Dancer> = self.roster().into_iter().cloned().collect();
        badges::badges(&self.conflicts, &roster)
    }

    // --- Dancer edits ---

    /// Adds a dancer to the roster and appends it to the store
    pub async fn add_dancer(&mut self, dancer: Dancer) -> Result<(), BoardError> {
        let snapshot = self.snapshot();
        let outcome_dancer = dancer.clone();
        self.dancers.push(dancer);
        self.recompute();

        let outcome = self.store.append_dancer(&outcome_dancer).await;
        self.settle(snapshot, outcome)
    }

    /// Sets a dancer's backstage status
    pub async fn update_check_in(
        &mut self,
        dancer_id: &DancerId,
        status: CheckInStatus,
    ) -> Result<(), BoardError> {
        let idx = self.dancer_position(dancer_id)?;
        let snapshot = self.snapshot();
        self.dancers[idx].check_in_status = Some(status);
        self.recompute();

        let Some(row) = self.dancers[idx].row_index else {
            debug!(dancer_id = %dancer_id, "Dancer not persisted, status kept locally");
            return Ok(());
        };
        let outcome = self.store.update_check_in_status(row, status).await;
        self.settle(snapshot, outcome)
    }

    /// Replaces a dancer's costume measurements
    pub async fn update_measurements(
        &mut self,
        dancer_id: &DancerId,
        measurements: Measurements,
    ) -> Result<(), BoardError> {
        let idx = self.dancer_position(dancer_id)?;
        let snapshot = self.snapshot();
        self.dancers[idx].measurements = measurements;
        self.recompute();

        let Some(row) = self.dancers[idx].row_index else {
            debug!(dancer_id = %dancer_id, "Dancer not persisted, measurements kept locally");
            return Ok(());
        };
        let outcome = self.store.update_measurements(row, &measurements).await;
        self.settle(snapshot, outcome)
    }

    // --- Event edits ---

    /// Adds an event to the current recital's schedule
    pub async fn add_event(&mut self, mut event: Event) -> Result<(), BoardError> {
        let recital = self.current.clone().ok_or(BoardError::NoRecitalSelected)?;
        if event.recital_id.is_none() {
            event.recital_id = Some(recital.clone());
        }

        let snapshot = self.snapshot();
        self.events.push(event.clone());
        self.recompute();

        let outcome = self.store.save_event(&recital, &event).await;
        self.settle(snapshot, outcome)
    }

    /// Replaces the event with the same id
    pub async fn update_event(&mut self, event: Event) -> Result<(), BoardError> {
        let recital = self.current.clone().ok_or(BoardError::NoRecitalSelected)?;
        let idx = self.event_position(&event.id)?;
        let row = self.events[idx].row_index;

        let snapshot = self.snapshot();
        self.events[idx] = Event {
            row_index: row,
            ..event
        };
        self.recompute();

        let Some(row) = row else {
            debug!(event_id = %self.events[idx].id, "Event not persisted, update kept locally");
            return Ok(());
        };
        let outcome = self
            .store
            .update_event(&recital, row, &self.events[idx])
            .await;
        self.settle(snapshot, outcome)
    }

    /// Removes an event from the schedule
    ///
    /// Unknown or never-persisted events are left alone.
    pub async fn delete_event(&mut self, event_id: &EventId) -> Result<(), BoardError> {
        let recital = self.current.clone().ok_or(BoardError::NoRecitalSelected)?;
        let Some(idx) = self.events.iter().position(|e| &e.id == event_id) else {
            return Ok(());
        };
        let Some(row) = self.events[idx].row_index else {
            return Ok(());
        };

        let snapshot = self.snapshot();
        self.events.remove(idx);
        self.recompute();

        let outcome = self.store.delete_event(&recital, row).await;
        self.settle(snapshot, outcome)
    }

    // --- Internals ---

    fn recompute(&mut self) {
        self.conflicts = detect_conflicts(&self.events, &self.dancers);
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            dancers: self.dancers.clone(),
            events: self.events.clone(),
        }
    }

    /// Keeps the optimistic change on success, restores `snapshot` on failure
    fn settle(&mut self, snapshot: Snapshot, outcome: WriteOutcome) -> Result<(), BoardError> {
        match outcome {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(error = %e, "Store write failed, reverting local change");
                self.dancers = snapshot.dancers;
                self.events = snapshot.events;
                self.recompute();
                Err(e.into())
            }
        }
    }

    fn dancer_position(&self, dancer_id: &DancerId) -> Result<usize, BoardError> {
        self.dancers
            .iter()
            .position(|d| &d.id == dancer_id)
            .ok_or_else(|| BoardError::UnknownDancer(dancer_id.clone()))
    }

    fn event_position(&self, event_id: &EventId) -> Result<usize, BoardError> {
        self.events
            .iter()
            .position(|e| &e.id == event_id)
            .ok_or_else(|| BoardError::UnknownEvent(event_id.clone()))
    }
}
