//! Where a command reads its schedule from
//!
//! Commands that only inspect a schedule accept `--file` to read a local
//! snapshot (YAML, or JSON by extension) instead of the configured
//! spreadsheet. Both paths end in a [`Schedule`] for one recital.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use recital_conflict::{detect_conflicts, RecitalBoard};
use recital_core::{
    config::Config,
    domain::{recital::belongs_to, Conflict, Dancer, Event, Recital, RecitalId},
};
use recital_sheets::store::SheetsStore;

/// Schedule source flags shared by read-only commands
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Read dancers and events from a YAML or JSON snapshot instead of the spreadsheet
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Recital to inspect (defaults to the active recital)
    #[arg(long, value_name = "ID")]
    pub recital: Option<String>,
}

/// Contents of a snapshot file
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub recitals: Vec<Recital>,
    #[serde(default)]
    pub dancers: Vec<Dancer>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let snapshot: Snapshot = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON snapshot {}", path.display()))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML snapshot {}", path.display()))?
        };

        debug!(
            path = %path.display(),
            recitals = snapshot.recitals.len(),
            dancers = snapshot.dancers.len(),
            events = snapshot.events.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }
}

/// One recital's events together with the full roster
#[derive(Debug)]
pub struct Schedule {
    pub recital: RecitalId,
    pub dancers: Vec<Dancer>,
    pub events: Vec<Event>,
}

impl Schedule {
    /// Picks the recital from a snapshot: `requested`, else the first
    /// active recital, else the first listed, else the configured default
    pub fn from_snapshot(snapshot: Snapshot, requested: Option<&str>, config: &Config) -> Result<Self> {
        let recital = match requested {
            Some(id) => RecitalId::new(id)?,
            None => match Recital::pick_initial(&snapshot.recitals) {
                Some(r) => r.id.clone(),
                None => RecitalId::new(config.schedule.default_recital.as_str())
                    .context("schedule.default_recital is not a valid recital id")?,
            },
        };

        let events = snapshot
            .events
            .into_iter()
            .filter(|e| belongs_to(e.recital_id.as_ref(), &recital))
            .collect();

        Ok(Self {
            recital,
            dancers: snapshot.dancers,
            events,
        })
    }

    /// Dancers taking part in this recital
    pub fn roster(&self) -> Vec<Dancer> {
        self.dancers
            .iter()
            .filter(|d| belongs_to(d.recital_id.as_ref(), &self.recital))
            .cloned()
            .collect()
    }

    pub fn conflicts(&self) -> Vec<Conflict> {
        detect_conflicts(&self.events, &self.dancers)
    }
}

/// Opens the configured spreadsheet as a loaded board
pub async fn open_board(config: &Config, recital: Option<&str>) -> Result<RecitalBoard> {
    let store = SheetsStore::from_config(config).context("Failed to open the recital spreadsheet")?;
    let mut board = RecitalBoard::new(Arc::new(store));
    board
        .load()
        .await
        .context("Failed to load the recital spreadsheet")?;

    if let Some(id) = recital {
        board
            .select_recital(RecitalId::new(id)?)
            .await
            .with_context(|| format!("Failed to load recital {id}"))?;
    }

    info!(
        recital_id = ?board.current_recital(),
        dancers = board.dancers().len(),
        events = board.events().len(),
        "Opened recital spreadsheet"
    );
    Ok(board)
}

/// Loads the schedule selected by `args`
pub async fn load_schedule(args: &SourceArgs, config: &Config) -> Result<Schedule> {
    if let Some(path) = &args.file {
        let snapshot = Snapshot::load(path)?;
        return Schedule::from_snapshot(snapshot, args.recital.as_deref(), config);
    }

    let board = open_board(config, args.recital.as_deref()).await?;
    let recital = board
        .current_recital()
        .cloned()
        .context("The spreadsheet has no recital to show")?;
    Ok(Schedule {
        recital,
        dancers: board.dancers().to_vec(),
        events: board.events().to_vec(),
    })
}
