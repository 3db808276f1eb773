//! Integration tests for reading the recital spreadsheet
//!
//! Verifies that rows map to typed records, that malformed rows are skipped
//! and that API errors surface as the right store errors.

use recital_core::{
    domain::{CheckInStatus, DancerId, RecitalId, StoreError},
    ports::IRecitalStore,
};
use recital_sheets::{
    client::SheetsClient,
    session::{Credentials, SheetsSession},
    SheetsError,
};
use serde_json::json;
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use crate::common;

fn ids<T, F: Fn(&T) -> &str>(items: &[T], id: F) -> Vec<&str> {
    items.iter().map(id).collect()
}

#[tokio::test]
async fn test_fetch_dancers_skips_bad_and_blank_rows() {
    let (_server, store) = common::setup_sheets_mock().await;

    let dancers = store.fetch_dancers().await.expect("fetch_dancers failed");

    assert_eq!(ids(&dancers, |d| d.id.as_str()), vec!["d1", "d3", "d4"]);

    let alice = &dancers[0];
    assert_eq!(alice.name, "Alice");
    assert_eq!(alice.role, "Lead");
    assert_eq!(alice.measurements.girth, Some(78.0));
    assert_eq!(alice.measurements.hips, Some(88.0));
    assert_eq!(alice.row_index.map(|r| r.get()), Some(2));

    let carol = &dancers[1];
    assert_eq!(carol.role, "Dancer");
    assert_eq!(carol.check_in_status, Some(CheckInStatus::Dressed));
    assert_eq!(carol.row_index.map(|r| r.get()), Some(4));

    // The blank row still occupies a sheet row.
    assert_eq!(dancers[2].row_index.map(|r| r.get()), Some(6));
}

#[tokio::test]
async fn test_fetch_recitals() {
    let (_server, store) = common::setup_sheets_mock().await;

    let recitals = store.fetch_recitals().await.expect("fetch_recitals failed");

    assert_eq!(recitals.len(), 2);
    assert_eq!(recitals[0].id.as_str(), "recital-1");
    assert_eq!(recitals[0].location, "Main Theater");
    assert!(recitals[0].active);
    assert!(!recitals[1].active);
}

#[tokio::test]
async fn test_fetch_events_tags_and_dedupes() {
    let (_server, store) = common::setup_sheets_mock().await;
    let recital = RecitalId::new("recital-1").unwrap();

    let events = store.fetch_events(&recital).await.expect("fetch_events failed");

    assert_eq!(ids(&events, |e| e.id.as_str()), vec!["e2", "e1", "e3"]);
    assert!(events.iter().all(|e| e.recital_id.as_ref() == Some(&recital)));

    let opening = &events[1];
    assert_eq!(
        opening.assigned_dancers,
        vec![DancerId::new("d1").unwrap(), DancerId::new("d3").unwrap()]
    );
    assert_eq!(opening.row_index.map(|r| r.get()), Some(3));
}

#[tokio::test]
async fn test_missing_events_sheet_is_not_found() {
    let server = MockServer::start().await;
    common::mount_missing_range(&server, "Events_recital-7!A1:F").await;
    let store = common::store_for(&server, Credentials::ApiKey("key".into()));

    let err = store
        .fetch_events(&RecitalId::new("recital-7").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::NotFound(ref what) if what == "Events_recital-7!A1:F"));
}

#[tokio::test]
async fn test_empty_range_has_no_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(common::values_path("Sheet1!A1:H")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "Sheet1!A1:H",
            "majorDimension": "ROWS"
        })))
        .mount(&server)
        .await;
    let store = common::store_for(&server, Credentials::ApiKey("key".into()));

    let dancers = store.fetch_dancers().await.expect("fetch_dancers failed");
    assert!(dancers.is_empty());
}

#[tokio::test]
async fn test_api_key_is_sent_as_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(common::values_path("Sheet4!A1:G")))
        .and(query_param("key", "public-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "values": common::recital_rows()
        })))
        .expect(1)
        .mount(&server)
        .await;
    let store = common::store_for(&server, Credentials::ApiKey("public-key".into()));

    let recitals = store.fetch_recitals().await.expect("fetch_recitals failed");
    assert_eq!(recitals.len(), 2);
}

#[tokio::test]
async fn test_initialize_returns_title() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v4/spreadsheets/{}", common::SPREADSHEET_ID)))
        .and(query_param("fields", "properties.title"))
        .and(header("authorization", "Bearer test-access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "properties": { "title": "Recital Planner" }
        })))
        .mount(&server)
        .await;

    let session = SheetsSession::new(
        common::SPREADSHEET_ID,
        Credentials::AccessToken("test-access-token".into()),
    );
    let client = SheetsClient::with_base_url(session, server.uri());

    let title = client.initialize().await.expect("initialize failed");
    assert_eq!(title, "Recital Planner");
}

#[tokio::test]
async fn test_initialize_maps_auth_and_missing_spreadsheet() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v4/spreadsheets/{}", common::SPREADSHEET_ID)))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "The caller does not have permission" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let denied = SheetsClient::with_base_url(
        SheetsSession::new(common::SPREADSHEET_ID, Credentials::ApiKey("key".into())),
        server.uri(),
    );
    match denied.initialize().await {
        Err(SheetsError::Unauthorized(msg)) => {
            assert_eq!(msg, "The caller does not have permission")
        }
        other => panic!("expected Unauthorized, got {other:?}"),
    }

    let missing = SheetsClient::with_base_url(
        SheetsSession::new("missing", Credentials::ApiKey("key".into())),
        server.uri(),
    );
    assert!(matches!(
        missing.initialize().await,
        Err(SheetsError::SpreadsheetNotFound(_))
    ));
}

#[tokio::test]
async fn test_server_errors_are_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(common::values_path("Sheet1!A1:H")))
        .respond_with(ResponseTemplate::new(503).set_body_string("backend unavailable"))
        .mount(&server)
        .await;
    let store = common::store_for(&server, Credentials::ApiKey("key".into()));

    let err = store.fetch_dancers().await.unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));
}
