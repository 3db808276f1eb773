//! Integration tests for a recital board backed by the spreadsheet
//!
//! Loads the mocked spreadsheet into a RecitalBoard and checks conflicts,
//! badges and the rollback of failed writes.

use std::sync::Arc;

use recital_conflict::{BoardError, RecitalBoard};
use recital_core::domain::{CheckInStatus, DancerId, EventId, StoreError};
use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

use crate::common;

#[tokio::test]
async fn test_board_loads_spreadsheet_and_detects_quick_change() {
    let (_server, store) = common::setup_sheets_mock().await;
    let mut board = RecitalBoard::new(Arc::new(store));

    board.load().await.expect("board load failed");

    assert_eq!(board.current_recital().map(|r| r.as_str()), Some("recital-1"));
    assert_eq!(board.dancers().len(), 3);
    assert_eq!(board.events().len(), 3);

    let conflicts = board.conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].id().as_str(), "d1-e1-e2");
    assert_eq!(
        conflicts[0].description(),
        "Quick Change: Alice is in \"Opening\" and \"Tap Line\" (Consecutive)"
    );

    let badges = board.badges();
    assert_eq!(badges.len(), 1);
    assert_eq!(badges[0].name, "Alice");
    assert_eq!(badges[0].conflict_count, 1);
}

#[tokio::test]
async fn test_failed_check_in_is_rolled_back() {
    let (server, store) = common::setup_sheets_mock().await;
    Mock::given(method("PUT"))
        .and(path(common::values_path("Sheet1!H2:H2")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "code": 500, "message": "Internal error encountered." }
        })))
        .mount(&server)
        .await;

    let mut board = RecitalBoard::new(Arc::new(store));
    board.load().await.expect("board load failed");

    let err = board
        .update_check_in(&DancerId::new("d1").unwrap(), CheckInStatus::InWings)
        .await
        .unwrap_err();

    assert!(matches!(err, BoardError::Store(StoreError::Unavailable(_))));
    assert_eq!(board.dancers()[0].check_in_status, None);
}

#[tokio::test]
async fn test_deleting_an_event_clears_its_conflict() {
    let (server, store) = common::setup_sheets_mock().await;
    Mock::given(method("POST"))
        .and(path(common::values_path("Events_recital-1!A2:F2:clear")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clearedRange": "Events_recital-1!A2:F2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut board = RecitalBoard::new(Arc::new(store));
    board.load().await.expect("board load failed");
    assert_eq!(board.conflicts().len(), 1);

    board
        .delete_event(&EventId::new("e2").unwrap())
        .await
        .expect("delete_event failed");

    assert_eq!(board.events().len(), 2);
    assert!(board.conflicts().is_empty());
}
