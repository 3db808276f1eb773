//! Google Sheets implementation of the recital store port
//!
//! The roster and recitals each live in one sheet; every recital has its own
//! events sheet named `{events_sheet_prefix}{recital_id}`. Rows that fail
//! their schema are skipped with a warning so a single bad cell never hides
//! the rest of the sheet.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use recital_core::{
    config::{Config, SheetsConfig},
    domain::{
        CheckInStatus, Dancer, Event, Measurements, Recital, RecitalId, RowIndex, StoreError,
    },
    ports::{IRecitalStore, WriteOutcome},
};

use crate::{
    client::SheetsClient,
    schema::{
        self, dancer_columns, event_columns, read_dancer, read_event, read_recital, RowError,
        EVENT_HEADER,
    },
    session::SheetsSession,
    SheetsError,
};

/// Store backed by one Google spreadsheet
pub struct SheetsStore {
    client: SheetsClient,
    sheets: SheetsConfig,
}

impl SheetsStore {
    pub fn new(client: SheetsClient, sheets: SheetsConfig) -> Self {
        Self { client, sheets }
    }

    /// Builds a store from configuration, reading the access token from the
    /// environment
    pub fn from_config(config: &Config) -> Result<Self, SheetsError> {
        let session = SheetsSession::from_config(config)?;
        let client = SheetsClient::with_base_url(session, config.sheets.api_base_url.clone());
        Ok(Self::new(client, config.sheets.clone()))
    }

    pub fn client(&self) -> &SheetsClient {
        &self.client
    }

    fn events_sheet(&self, recital: &RecitalId) -> String {
        self.sheets.events_sheet(recital.as_str())
    }

    fn events_range(&self, recital: &RecitalId) -> String {
        self.sheets.events_range(recital.as_str())
    }

    fn event_row_range(&self, recital: &RecitalId, row: RowIndex) -> String {
        schema::row_range(
            &self.events_sheet(recital),
            &event_columns::ID,
            &event_columns::RECITAL_ID,
            row,
        )
    }

    fn dancer_sheet(&self) -> &str {
        schema::sheet_of(&self.sheets.dancers_range)
    }
}

/// Parses every data row of `rows`, skipping the header, blank rows and rows
/// that fail their schema
fn read_rows<T>(
    rows: &[Vec<String>],
    sheet: &str,
    read: fn(usize, &[String]) -> Result<Option<T>, RowError>,
) -> Vec<T> {
    let mut skipped = 0usize;
    let records: Vec<T> = rows
        .iter()
        .skip(1)
        .enumerate()
        .filter_map(|(offset, cells)| match read(offset, cells) {
            Ok(record) => record,
            Err(e) => {
                warn!(sheet, row = e.row, field = e.field, reason = %e.reason, "Skipping invalid row");
                skipped += 1;
                None
            }
        })
        .collect();

    debug!(sheet, records = records.len(), skipped, "Parsed sheet rows");
    records
}

#[async_trait]
impl IRecitalStore for SheetsStore {
    async fn fetch_recitals(&self) -> Result<Vec<Recital>, StoreError> {
        let range = &self.sheets.recitals_range;
        let rows = self.client.get_values(range).await?;
        Ok(read_rows(&rows, schema::sheet_of(range), read_recital))
    }

    async fn create_recital(&self, recital: &Recital) -> WriteOutcome {
        self.client
            .append_values(&self.sheets.recitals_range, &[schema::recital_row(recital)])
            .await?;

        let sheet = self.events_sheet(&recital.id);
        match self.client.add_sheet(&sheet).await {
            Ok(()) => {}
            Err(SheetsError::Status { message, .. }) if message.contains("already exists") => {
                debug!(sheet = %sheet, "Events sheet already exists");
            }
            Err(e) => return Err(e.into()),
        }

        let header: Vec<Vec<String>> = vec![EVENT_HEADER.iter().map(|h| h.to_string()).collect()];
        let header_range = format!(
            "{sheet}!{}1:{}1",
            event_columns::ID.letter(),
            event_columns::RECITAL_ID.letter()
        );
        self.client.update_values(&header_range, &header).await?;

        info!(recital_id = %recital.id, "Created recital");
        Ok(())
    }

    async fn fetch_dancers(&self) -> Result<Vec<Dancer>, StoreError> {
        let range = &self.sheets.dancers_range;
        let rows = self.client.get_values(range).await?;
        Ok(read_rows(&rows, schema::sheet_of(range), read_dancer))
    }

    async fn append_dancer(&self, dancer: &Dancer) -> WriteOutcome {
        self.client
            .append_values(&self.sheets.dancers_range, &[schema::dancer_row(dancer)])
            .await?;
        info!(dancer_id = %dancer.id, "Appended dancer");
        Ok(())
    }

    async fn update_check_in_status(&self, row: RowIndex, status: CheckInStatus) -> WriteOutcome {
        let range = schema::row_range(
            self.dancer_sheet(),
            &dancer_columns::CHECK_IN_STATUS,
            &dancer_columns::CHECK_IN_STATUS,
            row,
        );
        self.client
            .update_values(&range, &[vec![status.label().to_string()]])
            .await?;
        debug!(%row, %status, "Updated check-in status");
        Ok(())
    }

    async fn update_measurements(&self, row: RowIndex, measurements: &Measurements) -> WriteOutcome {
        let range = schema::row_range(
            self.dancer_sheet(),
            &dancer_columns::GIRTH,
            &dancer_columns::HIPS,
            row,
        );
        self.client
            .update_values(&range, &[schema::measurement_cells(measurements)])
            .await?;
        debug!(%row, "Updated measurements");
        Ok(())
    }

    async fn fetch_events(&self, recital: &RecitalId) -> Result<Vec<Event>, StoreError> {
        let sheet = self.events_sheet(recital);
        let rows = self.client.get_values(&self.events_range(recital)).await?;

        let events = read_rows(&rows, &sheet, read_event)
            .into_iter()
            .filter_map(|mut event| {
                if event.recital_id.as_ref().is_some_and(|tag| tag != recital) {
                    warn!(
                        event_id = %event.id,
                        tag = ?event.recital_id,
                        sheet = %sheet,
                        "Skipping event tagged for another recital"
                    );
                    return None;
                }
                event.recital_id.get_or_insert_with(|| recital.clone());
                Some(event)
            })
            .collect();
        Ok(events)
    }

    async fn save_event(&self, recital: &RecitalId, event: &Event) -> WriteOutcome {
        self.client
            .append_values(&self.events_range(recital), &[schema::event_row(event, recital)])
            .await?;
        info!(event_id = %event.id, recital_id = %recital, "Saved event");
        Ok(())
    }

    async fn update_event(&self, recital: &RecitalId, row: RowIndex, event: &Event) -> WriteOutcome {
        self.client
            .update_values(
                &self.event_row_range(recital, row),
                &[schema::event_row(event, recital)],
            )
            .await?;
        debug!(event_id = %event.id, %row, "Updated event");
        Ok(())
    }

    async fn delete_event(&self, recital: &RecitalId, row: RowIndex) -> WriteOutcome {
        self.client
            .clear_values(&self.event_row_range(recital, row))
            .await?;
        info!(recital_id = %recital, %row, "Deleted event row");
        Ok(())
    }
}
