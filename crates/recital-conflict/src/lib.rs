//! Recital Conflict - Quick-change detection for recital schedules
//!
//! Provides:
//! - Chronological ordering of events that tolerates malformed dates
//! - Detection of dancers booked in two consecutive numbers
//! - Per-dancer conflict badges
//! - A board use case that keeps conflicts current while applying
//!   optimistic writes through the store port

pub mod badges;
pub mod detector;
pub mod error;
pub mod timestamp;
pub mod use_cases;

pub use detector::{detect_conflicts, ConflictDetector};
pub use error::BoardError;
pub use use_cases::RecitalBoard;
