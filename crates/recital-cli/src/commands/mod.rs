//! CLI command implementations

pub mod badges;
pub mod check_in;
pub mod completions;
pub mod config;
pub mod conflicts;
pub mod sizes;
pub mod source;
