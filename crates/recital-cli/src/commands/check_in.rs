//! Check-in command - Record a dancer's backstage status
//!
//! Provides the `recital check-in <dancer-id> <status>` CLI command which
//! writes the status to the roster sheet and prints the recital's backstage
//! tally. Requires an OAuth access token; API-key sessions are read-only.

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use recital_core::domain::{CheckInStatus, Dancer, DancerId};

use super::source::open_board;
use crate::output::CommandContext;

/// Arguments for the check-in subcommand
#[derive(Debug, Args)]
pub struct CheckInCommand {
    /// Dancer id as listed in the roster
    pub dancer_id: String,

    /// New status: "Not Ready", "Dressed" or "In Wings"
    pub status: String,

    /// Recital whose roster is shown in the tally
    #[arg(long, value_name = "ID")]
    pub recital: Option<String>,
}

impl CheckInCommand {
    /// Execute the check-in command
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter();

        let status: CheckInStatus = self.status.parse().with_context(|| {
            format!(
                "Unknown status '{}'; expected one of: {}",
                self.status,
                CheckInStatus::ALL.map(CheckInStatus::label).join(", ")
            )
        })?;
        let dancer_id = DancerId::new(self.dancer_id.as_str())?;

        let mut board = open_board(&ctx.config, self.recital.as_deref()).await?;
        board
            .update_check_in(&dancer_id, status)
            .await
            .with_context(|| format!("Failed to check in dancer {dancer_id}"))?;

        let name = board
            .dancers()
            .iter()
            .find(|d| d.id == dancer_id)
            .map(|d| d.name.clone())
            .unwrap_or_else(|| dancer_id.to_string());
        let tally = status_tally(board.roster());

        info!(dancer_id = %dancer_id, %status, "Checked in dancer");

        if ctx.is_json() {
            let json = serde_json::json!({
                "success": true,
                "dancerId": dancer_id,
                "name": name,
                "status": status,
                "tally": tally
                    .iter()
                    .map(|(s, n)| (s.label().to_string(), serde_json::Value::from(*n)))
                    .collect::<serde_json::Map<_, _>>(),
            });
            formatter.print_json(&json);
            return Ok(());
        }

        formatter.success(&format!("{name} is now {status}"));
        let summary: Vec<String> = tally
            .iter()
            .map(|(s, n)| format!("{s}: {n}"))
            .collect();
        formatter.info(&summary.join(", "));

        Ok(())
    }
}

/// Number of dancers per status in backstage order; dancers without a
/// status count as not ready
fn status_tally<'a>(roster: impl IntoIterator<Item = &'a Dancer>) -> Vec<(CheckInStatus, usize)> {
    let mut counts = CheckInStatus::ALL.map(|s| (s, 0usize));
    for dancer in roster {
        let status = dancer.check_in_status.unwrap_or(CheckInStatus::NotReady);
        if let Some(entry) = counts.iter_mut().find(|(s, _)| *s == status) {
            entry.1 += 1;
        }
    }
    counts.to_vec()
}
