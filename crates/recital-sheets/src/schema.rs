//! Row schemas for the recital spreadsheet
//!
//! Each sheet is described by a column mapping table: one [`Column`] per
//! position, naming the field, whether it must be present, and how its text
//! is parsed. Rows are validated against the table before any record is
//! built, so a bad cell is reported as a [`RowError`] with its sheet row and
//! field instead of turning into a half-filled record.
//!
//! The first row of every range is a header. The data row at offset `n` of
//! the values array lives at sheet row `n + 2`.

use recital_core::domain::{
    CheckInStatus, Dancer, DancerId, Event, EventId, Measurements, Recital, RecitalId, RowIndex,
};
use thiserror::Error;

/// A row that does not match its sheet's schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row}, column `{field}`: {reason}")]
pub struct RowError {
    /// 1-based sheet row
    pub row: u32,
    /// Field name from the mapping table
    pub field: &'static str,
    pub reason: String,
}

/// How a column's text is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Trimmed text
    Text,
    /// Decimal number
    Number,
    /// `TRUE`/`true`/`1`/`yes` are true, anything else false
    Flag,
    /// Backstage check-in status label
    Status,
    /// Comma-separated list; items are trimmed, blanks dropped, duplicates
    /// removed keeping the first occurrence
    List,
}

/// One entry of a column mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub index: usize,
    pub field: &'static str,
    pub required: bool,
    pub kind: CellKind,
}

impl Column {
    const fn required(index: usize, field: &'static str, kind: CellKind) -> Self {
        Self {
            index,
            field,
            required: true,
            kind,
        }
    }

    const fn optional(index: usize, field: &'static str, kind: CellKind) -> Self {
        Self {
            index,
            field,
            required: false,
            kind,
        }
    }

    /// Spreadsheet column letter (`A` for index 0)
    pub fn letter(&self) -> char {
        char::from(b'A' + self.index as u8)
    }
}

/// Columns of the roster sheet
pub mod dancer_columns {
    use super::{CellKind, Column};

    pub const ID: Column = Column::required(0, "id", CellKind::Text);
    pub const NAME: Column = Column::required(1, "name", CellKind::Text);
    pub const GIRTH: Column = Column::optional(2, "girth", CellKind::Number);
    pub const CHEST: Column = Column::optional(3, "chest", CellKind::Number);
    pub const WAIST: Column = Column::optional(4, "waist", CellKind::Number);
    pub const HIPS: Column = Column::optional(5, "hips", CellKind::Number);
    pub const ROLE: Column = Column::optional(6, "role", CellKind::Text);
    pub const CHECK_IN_STATUS: Column = Column::optional(7, "check_in_status", CellKind::Status);

    pub const ALL: [Column; 8] = [ID, NAME, GIRTH, CHEST, WAIST, HIPS, ROLE, CHECK_IN_STATUS];
}

/// Columns of the recitals sheet
pub mod recital_columns {
    use super::{CellKind, Column};

    pub const ID: Column = Column::required(0, "id", CellKind::Text);
    pub const NAME: Column = Column::optional(1, "name", CellKind::Text);
    pub const DATE: Column = Column::optional(2, "date", CellKind::Text);
    pub const LOCATION: Column = Column::optional(3, "location", CellKind::Text);
    pub const SCHOOL: Column = Column::optional(4, "school", CellKind::Text);
    pub const THEME: Column = Column::optional(5, "theme", CellKind::Text);
    pub const ACTIVE: Column = Column::optional(6, "active", CellKind::Flag);

    pub const ALL: [Column; 7] = [ID, NAME, DATE, LOCATION, SCHOOL, THEME, ACTIVE];
}

/// Columns of a recital's events sheet
pub mod event_columns {
    use super::{CellKind, Column};

    pub const ID: Column = Column::required(0, "id", CellKind::Text);
    pub const TITLE: Column = Column::optional(1, "title", CellKind::Text);
    pub const DATE: Column = Column::required(2, "date", CellKind::Text);
    pub const TIME: Column = Column::optional(3, "time", CellKind::Text);
    pub const ASSIGNED_DANCERS: Column = Column::optional(4, "assigned_dancers", CellKind::List);
    pub const RECITAL_ID: Column = Column::optional(5, "recital_id", CellKind::Text);

    pub const ALL: [Column; 6] = [ID, TITLE, DATE, TIME, ASSIGNED_DANCERS, RECITAL_ID];
}

/// Header row written to a new events sheet
pub const EVENT_HEADER: [&str; 6] = [
    "id",
    "title",
    "date",
    "time",
    "assigned_dancers",
    "recital_id",
];

// ============================================================================
// Parsing
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Flag(bool),
    Status(CheckInStatus),
    List(Vec<String>),
}

fn parse_cell(kind: CellKind, raw: &str) -> Result<CellValue, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(CellValue::Empty);
    }
    match kind {
        CellKind::Text => Ok(CellValue::Text(raw.to_string())),
        CellKind::Number => raw
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(CellValue::Number)
            .ok_or_else(|| format!("`{raw}` is not a number")),
        CellKind::Flag => Ok(CellValue::Flag(matches!(
            raw,
            "TRUE" | "true" | "True" | "1" | "yes" | "Yes"
        ))),
        CellKind::Status => raw
            .parse::<CheckInStatus>()
            .map(CellValue::Status)
            .map_err(|e| e.to_string()),
        CellKind::List => {
            let mut items: Vec<String> = Vec::new();
            for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                if !items.iter().any(|seen| seen == item) {
                    items.push(item.to_string());
                }
            }
            Ok(CellValue::List(items))
        }
    }
}

/// A row whose cells passed its mapping table
struct ParsedRow {
    row: RowIndex,
    values: Vec<CellValue>,
}

impl ParsedRow {
    /// Validates `cells` against `columns`
    ///
    /// Returns `Ok(None)` for a row with no content at all.
    fn parse(
        columns: &[Column],
        row: RowIndex,
        cells: &[String],
    ) -> Result<Option<Self>, RowError> {
        if cells.iter().all(|c| c.trim().is_empty()) {
            return Ok(None);
        }

        let mut values = Vec::with_capacity(columns.len());
        for column in columns {
            let raw = cells.get(column.index).map(String::as_str).unwrap_or_default();
            let value = parse_cell(column.kind, raw).map_err(|reason| RowError {
                row: row.get(),
                field: column.field,
                reason,
            })?;
            if column.required && value == CellValue::Empty {
                return Err(RowError {
                    row: row.get(),
                    field: column.field,
                    reason: "required value is missing".to_string(),
                });
            }
            values.push(value);
        }
        Ok(Some(Self { row, values }))
    }

    fn value(&self, column: &Column) -> &CellValue {
        self.values.get(column.index).unwrap_or(&CellValue::Empty)
    }

    fn text(&self, column: &Column) -> Option<&str> {
        match self.value(column) {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    fn text_or_default(&self, column: &Column) -> String {
        self.text(column).unwrap_or_default().to_string()
    }

    fn number(&self, column: &Column) -> Option<f64> {
        match self.value(column) {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn flag(&self, column: &Column) -> bool {
        matches!(self.value(column), CellValue::Flag(true))
    }

    fn status(&self, column: &Column) -> Option<CheckInStatus> {
        match self.value(column) {
            CellValue::Status(s) => Some(*s),
            _ => None,
        }
    }

    fn list(&self, column: &Column) -> &[String] {
        match self.value(column) {
            CellValue::List(items) => items,
            _ => &[],
        }
    }

    fn error(&self, column: &Column, reason: impl ToString) -> RowError {
        RowError {
            row: self.row.get(),
            field: column.field,
            reason: reason.to_string(),
        }
    }
}

/// Reads the dancer at data offset `offset`
pub fn read_dancer(offset: usize, cells: &[String]) -> Result<Option<Dancer>, RowError> {
    use dancer_columns as col;

    let row = RowIndex::from_data_offset(offset);
    let Some(parsed) = ParsedRow::parse(&col::ALL, row, cells)? else {
        return Ok(None);
    };

    let id = DancerId::new(parsed.text_or_default(&col::ID))
        .map_err(|e| parsed.error(&col::ID, e))?;
    let measurements = Measurements {
        girth: parsed.number(&col::GIRTH),
        chest: parsed.number(&col::CHEST),
        waist: parsed.number(&col::WAIST),
        hips: parsed.number(&col::HIPS),
    };

    let mut dancer = Dancer::new(id, parsed.text_or_default(&col::NAME))
        .with_measurements(measurements)
        .with_row_index(row);
    if let Some(role) = parsed.text(&col::ROLE) {
        dancer = dancer.with_role(role);
    }
    dancer.check_in_status = parsed.status(&col::CHECK_IN_STATUS);
    Ok(Some(dancer))
}

/// Reads the recital at data offset `offset`
pub fn read_recital(offset: usize, cells: &[String]) -> Result<Option<Recital>, RowError> {
    use recital_columns as col;

    let row = RowIndex::from_data_offset(offset);
    let Some(parsed) = ParsedRow::parse(&col::ALL, row, cells)? else {
        return Ok(None);
    };

    let id = RecitalId::new(parsed.text_or_default(&col::ID))
        .map_err(|e| parsed.error(&col::ID, e))?;
    Ok(Some(Recital {
        id,
        name: parsed.text_or_default(&col::NAME),
        date: parsed.text_or_default(&col::DATE),
        location: parsed.text_or_default(&col::LOCATION),
        school: parsed.text_or_default(&col::SCHOOL),
        theme: parsed.text_or_default(&col::THEME),
        active: parsed.flag(&col::ACTIVE),
    }))
}

/// Reads the event at data offset `offset`
pub fn read_event(offset: usize, cells: &[String]) -> Result<Option<Event>, RowError> {
    use event_columns as col;

    let row = RowIndex::from_data_offset(offset);
    let Some(parsed) = ParsedRow::parse(&col::ALL, row, cells)? else {
        return Ok(None);
    };

    let id = EventId::new(parsed.text_or_default(&col::ID))
        .map_err(|e| parsed.error(&col::ID, e))?;
    let dancers = parsed
        .list(&col::ASSIGNED_DANCERS)
        .iter()
        .map(|d| DancerId::new(d.as_str()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| parsed.error(&col::ASSIGNED_DANCERS, e))?;

    let mut event = Event::new(id, parsed.text_or_default(&col::TITLE), parsed.text_or_default(&col::DATE))
        .with_dancers(dancers)
        .with_row_index(row);
    if let Some(time) = parsed.text(&col::TIME) {
        event = event.at(time);
    }
    if let Some(recital) = parsed.text(&col::RECITAL_ID) {
        let recital = RecitalId::new(recital).map_err(|e| parsed.error(&col::RECITAL_ID, e))?;
        event = event.with_recital(recital);
    }
    Ok(Some(event))
}

// ============================================================================
// Writing
// ============================================================================

/// Text of a number as written back to the sheet (`80`, not `80.0`)
fn number_cell(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", v as i64),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

/// Full roster row for `dancer`
pub fn dancer_row(dancer: &Dancer) -> Vec<String> {
    let mut row = vec![dancer.id.to_string(), dancer.name.clone()];
    row.extend(measurement_cells(&dancer.measurements));
    row.push(dancer.role.clone());
    row.push(
        dancer
            .check_in_status
            .map(|s| s.label().to_string())
            .unwrap_or_default(),
    );
    row
}

/// Cells `girth` through `hips` of a roster row
pub fn measurement_cells(measurements: &Measurements) -> Vec<String> {
    vec![
        number_cell(measurements.girth),
        number_cell(measurements.chest),
        number_cell(measurements.waist),
        number_cell(measurements.hips),
    ]
}

/// Full recitals row for `recital`
pub fn recital_row(recital: &Recital) -> Vec<String> {
    vec![
        recital.id.to_string(),
        recital.name.clone(),
        recital.date.clone(),
        recital.location.clone(),
        recital.school.clone(),
        recital.theme.clone(),
        if recital.active { "TRUE" } else { "FALSE" }.to_string(),
    ]
}

/// Full events row for `event`, tagged with `recital` when untagged
pub fn event_row(event: &Event, recital: &RecitalId) -> Vec<String> {
    let dancers: Vec<&str> = event.assigned_dancers.iter().map(DancerId::as_str).collect();
    vec![
        event.id.to_string(),
        event.title.clone(),
        event.date.clone(),
        event.time.clone().unwrap_or_default(),
        dancers.join(","),
        event.recital_id.as_ref().unwrap_or(recital).to_string(),
    ]
}

/// Sheet tab named by an A1 range (`Sheet1!A1:H` -> `Sheet1`)
pub fn sheet_of(range: &str) -> &str {
    range.split_once('!').map_or(range, |(sheet, _)| sheet)
}

/// A1 range covering `first..=last` columns of one sheet row
pub fn row_range(sheet: &str, first: &Column, last: &Column, row: RowIndex) -> String {
    format!("{sheet}!{}{row}:{}{row}", first.letter(), last.letter())
}
