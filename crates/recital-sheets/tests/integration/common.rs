//! Shared test helpers for Sheets API integration tests
//!
//! Each helper mounts mock endpoints on a wiremock server. `setup_*`
//! functions return the server together with a store pointing at it.

use recital_core::config::Config;
use recital_sheets::{
    client::SheetsClient,
    session::{Credentials, SheetsSession},
    store::SheetsStore,
};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SPREADSHEET_ID: &str = "sheet-test-001";

/// Path of the values endpoint for `range`
pub fn values_path(range: &str) -> String {
    format!("/v4/spreadsheets/{SPREADSHEET_ID}/values/{range}")
}

/// Store over `server` using `credentials`
pub fn store_for(server: &MockServer, credentials: Credentials) -> SheetsStore {
    let session = SheetsSession::new(SPREADSHEET_ID, credentials);
    let client = SheetsClient::with_base_url(session, server.uri());
    SheetsStore::new(client, Config::default().sheets)
}

/// Mounts `GET .../values/{range}` returning `rows`
pub async fn mount_values(server: &MockServer, range: &str, rows: Value) {
    Mock::given(method("GET"))
        .and(path(values_path(range)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": range,
            "majorDimension": "ROWS",
            "values": rows
        })))
        .mount(server)
        .await;
}

/// Mounts a read of `range` that fails because the sheet tab is missing
pub async fn mount_missing_range(server: &MockServer, range: &str) {
    Mock::given(method("GET"))
        .and(path(values_path(range)))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": format!("Unable to parse range: {range}"),
                "status": "INVALID_ARGUMENT"
            }
        })))
        .mount(server)
        .await;
}

/// Roster with one good dancer per recital plus a malformed row
pub fn roster_rows() -> Value {
    json!([
        ["id", "name", "girth", "chest", "waist", "hips", "role", "check_in_status"],
        ["d1", "Alice", "78", "82", "64", "88", "Lead"],
        ["d2", "Bob", "not-a-number"],
        ["d3", "Carol", "", "", "", "", "", "Dressed"],
        [],
        ["d4", "Dana", "90"]
    ])
}

pub fn recital_rows() -> Value {
    json!([
        ["id", "name", "date", "location", "school", "theme", "active"],
        ["recital-1", "Spring Showcase", "2024-06-15", "Main Theater", "Studio", "Garden", "TRUE"],
        ["recital-2", "Winter Gala", "2024-12-20", "Hall", "Studio", "", "FALSE"]
    ])
}

/// Schedule of `recital-1`: Alice changes between the first two numbers
pub fn event_rows() -> Value {
    json!([
        ["id", "title", "date", "time", "assigned_dancers", "recital_id"],
        ["e2", "Tap Line", "2024-06-15", "18:10", "d1, d4", "recital-1"],
        ["e1", "Opening", "2024-06-15", "18:00", "d1,d3,d1"],
        ["e3", "Finale", "2024-06-15", "18:30", "d3", "recital-1"],
        ["bad", "No Date", "", "19:00", "d4"],
        ["e9", "Encore", "2024-12-20", "20:00", "d1", "recital-2"]
    ])
}

/// Mounts the roster, the recitals and the `recital-1` schedule and returns
/// a read/write store
pub async fn setup_sheets_mock() -> (MockServer, SheetsStore) {
    let server = MockServer::start().await;

    mount_values(&server, "Sheet1!A1:H", roster_rows()).await;
    mount_values(&server, "Sheet4!A1:G", recital_rows()).await;
    mount_values(&server, "Events_recital-1!A1:F", event_rows()).await;

    let store = store_for(&server, Credentials::AccessToken("test-access-token".into()));
    (server, store)
}
