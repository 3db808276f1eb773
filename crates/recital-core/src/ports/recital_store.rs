//! Recital store port (driven/secondary port)
//!
//! This module defines the interface for loading and persisting recitals,
//! the dancer roster and each recital's schedule.
//!
//! ## Design Notes
//!
//! - Every write returns a [`WriteOutcome`]. Callers that apply changes
//!   locally before the write completes use it to keep or revert them.
//! - Records are addressed by their [`RowIndex`]; records without one have
//!   never been persisted.
//! - Conflicts are derived data and have no place in the store.

use crate::domain::{
    CheckInStatus, Dancer, Event, Measurements, Recital, RecitalId, RowIndex, StoreError,
};

/// Result of a single store write
pub type WriteOutcome = Result<(), StoreError>;

/// Port trait for recital persistence
#[async_trait::async_trait]
pub trait IRecitalStore: Send + Sync {
    // --- Recital operations ---

    /// Lists every recital known to the store
    async fn fetch_recitals(&self) -> Result<Vec<Recital>, StoreError>;

    /// Persists a new recital and prepares an empty schedule for it
    async fn create_recital(&self, recital: &Recital) -> WriteOutcome;

    // --- Dancer operations ---

    /// Loads the full roster
    async fn fetch_dancers(&self) -> Result<Vec<Dancer>, StoreError>;

    /// Appends a dancer to the roster
    async fn append_dancer(&self, dancer: &Dancer) -> WriteOutcome;

    /// Writes the backstage status of the dancer stored at `row`
    async fn update_check_in_status(&self, row: RowIndex, status: CheckInStatus) -> WriteOutcome;

    /// Writes the measurements of the dancer stored at `row`
    async fn update_measurements(&self, row: RowIndex, measurements: &Measurements)
        -> WriteOutcome;

    // --- Event operations ---

    /// Loads the schedule of `recital`
    async fn fetch_events(&self, recital: &RecitalId) -> Result<Vec<Event>, StoreError>;

    /// Appends an event to the schedule of `recital`
    async fn save_event(&self, recital: &RecitalId, event: &Event) -> WriteOutcome;

    /// Overwrites the event stored at `row`
    async fn update_event(&self, recital: &RecitalId, row: RowIndex, event: &Event)
        -> WriteOutcome;

    /// Removes the event stored at `row`
    async fn delete_event(&self, recital: &RecitalId, row: RowIndex) -> WriteOutcome;
}
