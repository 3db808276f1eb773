//! Integration tests for writes to the recital spreadsheet
//!
//! Verifies the ranges and bodies sent for each store write and that
//! read-only sessions never reach the network.

use chrono::NaiveDate;
use recital_core::{
    domain::{
        CheckInStatus, Dancer, DancerId, Event, EventId, Measurements, Recital, RecitalId,
        RowIndex, StoreError,
    },
    ports::IRecitalStore,
};
use recital_sheets::{session::Credentials, store::SheetsStore};
use serde_json::json;
use wiremock::{
    matchers::{body_json, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use crate::common;

fn row(n: u32) -> RowIndex {
    RowIndex::new(n).unwrap()
}

fn recital() -> RecitalId {
    RecitalId::new("recital-1").unwrap()
}

fn writable_store(server: &MockServer) -> SheetsStore {
    common::store_for(server, Credentials::AccessToken("test-access-token".into()))
}

#[tokio::test]
async fn test_update_check_in_status_writes_single_cell() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(common::values_path("Sheet1!H3:H3")))
        .and(query_param("valueInputOption", "RAW"))
        .and(body_json(json!({
            "range": "Sheet1!H3:H3",
            "majorDimension": "ROWS",
            "values": [["In Wings"]]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "updatedCells": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let store = writable_store(&server);
    store
        .update_check_in_status(row(3), CheckInStatus::InWings)
        .await
        .expect("update_check_in_status failed");
}

#[tokio::test]
async fn test_update_measurements_writes_measurement_columns() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(common::values_path("Sheet1!C2:F2")))
        .and(body_json(json!({
            "range": "Sheet1!C2:F2",
            "majorDimension": "ROWS",
            "values": [["84", "", "70.5", "96"]]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let store = writable_store(&server);
    let measurements = Measurements {
        girth: Some(84.0),
        chest: None,
        waist: Some(70.5),
        hips: Some(96.0),
    };
    store
        .update_measurements(row(2), &measurements)
        .await
        .expect("update_measurements failed");
}

#[tokio::test]
async fn test_append_dancer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(common::values_path("Sheet1!A1:H:append")))
        .and(query_param("valueInputOption", "RAW"))
        .and(body_json(json!({
            "range": "Sheet1!A1:H",
            "majorDimension": "ROWS",
            "values": [["d9", "Eve", "", "", "", "", "Ensemble", ""]]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let store = writable_store(&server);
    let dancer = Dancer::new(DancerId::new("d9").unwrap(), "Eve").with_role("Ensemble");
    store.append_dancer(&dancer).await.expect("append_dancer failed");
}

#[tokio::test]
async fn test_save_update_and_delete_event() {
    let server = MockServer::start().await;
    let event = Event::new(EventId::new("e5").unwrap(), "Jazz", "2024-06-15")
        .at("19:00")
        .with_dancers([DancerId::new("d1").unwrap(), DancerId::new("d3").unwrap()]);
    let expected_row = json!(["e5", "Jazz", "2024-06-15", "19:00", "d1,d3", "recital-1"]);

    Mock::given(method("POST"))
        .and(path(common::values_path("Events_recital-1!A1:F:append")))
        .and(body_json(json!({
            "range": "Events_recital-1!A1:F",
            "majorDimension": "ROWS",
            "values": [expected_row.clone()]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(common::values_path("Events_recital-1!A7:F7")))
        .and(body_json(json!({
            "range": "Events_recital-1!A7:F7",
            "majorDimension": "ROWS",
            "values": [expected_row]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(common::values_path("Events_recital-1!A7:F7:clear")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let store = writable_store(&server);
    store.save_event(&recital(), &event).await.expect("save_event failed");
    store
        .update_event(&recital(), row(7), &event)
        .await
        .expect("update_event failed");
    store
        .delete_event(&recital(), row(7))
        .await
        .expect("delete_event failed");
}

#[tokio::test]
async fn test_create_recital_adds_row_sheet_and_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(common::values_path("Sheet4!A1:G:append")))
        .and(body_json(json!({
            "range": "Sheet4!A1:G",
            "majorDimension": "ROWS",
            "values": [["recital-1", "Spring Showcase", "2024-05-01", "Main Theater", "Dance Studio", "", "TRUE"]]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/v4/spreadsheets/{}:batchUpdate", common::SPREADSHEET_ID)))
        .and(body_json(json!({
            "requests": [{ "addSheet": { "properties": { "title": "Events_recital-1" } } }]
        })))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "Invalid requests[0].addSheet: A sheet with the name \"Events_recital-1\" already exists."
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(common::values_path("Events_recital-1!A1:F1")))
        .and(body_json(json!({
            "range": "Events_recital-1!A1:F1",
            "majorDimension": "ROWS",
            "values": [["id", "title", "date", "time", "assigned_dancers", "recital_id"]]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let store = writable_store(&server);
    let recital = Recital::default_for(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    store
        .create_recital(&recital)
        .await
        .expect("create_recital failed");
}

#[tokio::test]
async fn test_read_only_session_refuses_writes_without_requests() {
    let server = MockServer::start().await;
    let store = common::store_for(&server, Credentials::ApiKey("public-key".into()));

    let err = store
        .update_check_in_status(row(2), CheckInStatus::Dressed)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::ReadOnly));

    let err = store.delete_event(&recital(), row(2)).await.unwrap_err();
    assert!(matches!(err, StoreError::ReadOnly));

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_rejected_write_maps_to_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(common::values_path("Sheet1!H2:H2")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "Requested writing within range outside the grid" }
        })))
        .mount(&server)
        .await;

    let store = writable_store(&server);
    let err = store
        .update_check_in_status(row(2), CheckInStatus::Dressed)
        .await
        .unwrap_err();

    match err {
        StoreError::Rejected(msg) => assert!(msg.contains("outside the grid")),
        other => panic!("expected Rejected, got {other:?}"),
    }
}
