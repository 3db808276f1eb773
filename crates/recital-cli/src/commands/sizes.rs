//! Sizes command - Recommend costume sizes from roster measurements

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::info;

use recital_core::domain::{
    sizing::{recommended_size, size_for},
    Dancer, DancerId, MeasurementKind, SizeLabel,
};

use super::source::{load_schedule, SourceArgs};
use crate::output::CommandContext;

/// Arguments for the sizes subcommand
#[derive(Debug, Args)]
pub struct SizesCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Include dancers without any measurements
    #[arg(long)]
    pub all: bool,
}

/// Size of one measured value
#[derive(Debug, Serialize)]
struct MeasuredSize {
    measurement: MeasurementKind,
    value: f64,
    size: SizeLabel,
}

/// Costume size recommendation for one dancer
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SizeReport {
    dancer_id: DancerId,
    name: String,
    role: String,
    sizes: Vec<MeasuredSize>,
    recommended: SizeLabel,
}

impl SizeReport {
    fn for_dancer(dancer: &Dancer) -> Self {
        let sizes = MeasurementKind::ALL
            .iter()
            .filter_map(|&kind| {
                kind.read(&dancer.measurements).map(|value| MeasuredSize {
                    measurement: kind,
                    value,
                    size: size_for(kind, value),
                })
            })
            .collect();

        Self {
            dancer_id: dancer.id.clone(),
            name: dancer.name.clone(),
            role: dancer.role.clone(),
            sizes,
            recommended: recommended_size(&dancer.measurements),
        }
    }
}

impl SizesCommand {
    /// Execute the sizes command
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter();
        let schedule = load_schedule(&self.source, &ctx.config).await?;

        let reports: Vec<SizeReport> = schedule
            .roster()
            .iter()
            .filter(|d| self.all || !d.measurements.is_empty())
            .map(SizeReport::for_dancer)
            .collect();

        info!(recital_id = %schedule.recital, dancers = reports.len(), "Computed costume sizes");

        if ctx.is_json() {
            let json = serde_json::json!({
                "recitalId": schedule.recital,
                "count": reports.len(),
                "dancers": reports,
            });
            formatter.print_json(&json);
            return Ok(());
        }

        if reports.is_empty() {
            formatter.success(&format!("No measured dancers in {}", schedule.recital));
            return Ok(());
        }

        formatter.success(&format!(
            "Costume sizes for {} ({} dancer{})",
            schedule.recital,
            reports.len(),
            if reports.len() == 1 { "" } else { "s" }
        ));
        formatter.info("");
        formatter.info("  Name                     Role         Size  Measurements");
        formatter.info("  ------------------------ ------------ ----  ------------");
        for report in &reports {
            let measured: Vec<String> = report
                .sizes
                .iter()
                .map(|m| format!("{} {} ({})", m.measurement.label(), m.value, m.size))
                .collect();
            formatter.info(&format!(
                "  {:<24} {:<12} {:<4}  {}",
                report.name,
                report.role,
                report.recommended.label(),
                if measured.is_empty() {
                    "not measured".to_string()
                } else {
                    measured.join(", ")
                }
            ));
        }

        Ok(())
    }
}
