//! Recital Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `Dancer`, `Event`, `Conflict`, `Recital`
//! - **Sizing rules** - costume size charts and size recommendation
//! - **Port definitions** - `IRecitalStore`, implemented by storage adapters
//! - **Configuration** - YAML-backed settings shared by every binary
//!
//! # Architecture
//!
//! The domain module contains pure business logic with no I/O.
//! Ports define trait interfaces that adapter crates implement.

pub mod config;
pub mod domain;
pub mod ports;
