//! Integration tests for recital-sheets
//!
//! Uses wiremock to simulate the Google Sheets API and verifies end-to-end
//! behavior of the SheetsClient, the SheetsStore adapter and a RecitalBoard
//! running on top of it.

mod common;

mod test_board;
mod test_fetch;
mod test_writes;
