//! Domain entities and business logic
//!
//! This module contains the core domain types for the recital planner:
//! - Newtypes for identifiers and sheet row positions
//! - Dancer records with costume measurements and check-in status
//! - Scheduled performance events
//! - Derived quick-change conflicts
//! - Recital metadata
//! - Costume sizing charts
//! - Domain-specific error types

pub mod conflict;
pub mod dancer;
pub mod errors;
pub mod event;
pub mod newtypes;
pub mod recital;
pub mod sizing;

// Re-export commonly used types
pub use conflict::{Conflict, Severity, UNKNOWN_DANCER};
pub use dancer::{CheckInStatus, Dancer, Measurements};
pub use errors::{DomainError, StoreError};
pub use event::Event;
pub use newtypes::*;
pub use recital::{Recital, DEFAULT_RECITAL_ID};
pub use sizing::{MeasurementKind, SizeLabel};
