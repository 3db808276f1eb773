//! Port definitions (hexagonal architecture interfaces)
//!
//! Ports are interfaces that the domain core depends on, but whose
//! implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IRecitalStore`] - Persistent storage for recitals, dancers and events

pub mod recital_store;

pub use recital_store::{IRecitalStore, WriteOutcome};
