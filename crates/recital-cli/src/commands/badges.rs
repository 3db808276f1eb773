//! Badges command - Show which dancers have scheduling conflicts
//!
//! Lists the dancers on a recital's roster that appear in at least one
//! quick change, with the number of conflicts each is part of.

use anyhow::Result;
use clap::Args;
use recital_conflict::badges::{badges, DancerBadge};
use tracing::info;

use super::source::{load_schedule, SourceArgs};
use crate::output::CommandContext;

/// Arguments for the badges subcommand
#[derive(Debug, Args)]
pub struct BadgesCommand {
    #[command(flatten)]
    pub source: SourceArgs,
}

impl BadgesCommand {
    /// Execute the badges command
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter();
        let schedule = load_schedule(&self.source, &ctx.config).await?;
        let roster = schedule.roster();
        let badges: Vec<DancerBadge> = badges(&schedule.conflicts(), &roster);

        info!(
            recital_id = %schedule.recital,
            roster = roster.len(),
            flagged = badges.len(),
            "Computed conflict badges"
        );

        if ctx.is_json() {
            let json = serde_json::json!({
                "recitalId": schedule.recital,
                "count": badges.len(),
                "badges": badges
                    .iter()
                    .map(|b| serde_json::json!({
                        "dancerId": b.dancer_id,
                        "name": b.name,
                        "conflictCount": b.conflict_count,
                        "tooltip": b.tooltip(),
                    }))
                    .collect::<Vec<_>>(),
            });
            formatter.print_json(&json);
            return Ok(());
        }

        if badges.is_empty() {
            formatter.success(&format!(
                "No dancer in {} has a scheduling conflict",
                schedule.recital
            ));
            return Ok(());
        }

        formatter.warn(&format!(
            "{} of {} dancers in {} have scheduling conflicts",
            badges.len(),
            roster.len(),
            schedule.recital
        ));
        for badge in &badges {
            formatter.info(&format!(
                "\u{26a0} {:<24} {}",
                badge.name,
                badge.tooltip()
            ));
        }

        Ok(())
    }
}
