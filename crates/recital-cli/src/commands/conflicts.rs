//! Conflicts command - List quick changes in a recital schedule
//!
//! Provides the `recital conflicts` CLI command which loads one recital's
//! schedule, puts the events in running order and reports every dancer who
//! appears in two consecutive numbers.

use anyhow::Result;
use clap::Args;
use recital_core::domain::Conflict;
use tracing::info;

use super::source::{load_schedule, Schedule, SourceArgs};
use crate::output::CommandContext;

/// Arguments for the conflicts subcommand
#[derive(Debug, Args)]
pub struct ConflictsCommand {
    #[command(flatten)]
    pub source: SourceArgs,
}

impl ConflictsCommand {
    /// Execute the conflicts command
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter();
        let schedule = load_schedule(&self.source, &ctx.config).await?;
        let conflicts = schedule.conflicts();

        info!(
            recital_id = %schedule.recital,
            events = schedule.events.len(),
            count = conflicts.len(),
            "Detected quick-change conflicts"
        );

        if ctx.is_json() {
            formatter.print_json(&conflicts_json(&schedule, &conflicts));
            return Ok(());
        }

        if conflicts.is_empty() {
            formatter.success(&format!(
                "No quick-change conflicts in {} ({} events)",
                schedule.recital,
                schedule.events.len()
            ));
            return Ok(());
        }

        formatter.warn(&format!(
            "{} quick-change conflict{} in {}",
            conflicts.len(),
            if conflicts.len() == 1 { "" } else { "s" },
            schedule.recital
        ));
        for conflict in &conflicts {
            formatter.info(&format!("[{}] {}", conflict.severity(), conflict.description()));
        }

        Ok(())
    }
}

fn conflicts_json(schedule: &Schedule, conflicts: &[Conflict]) -> serde_json::Value {
    serde_json::json!({
        "recitalId": schedule.recital,
        "count": conflicts.len(),
        "conflicts": conflicts,
    })
}
