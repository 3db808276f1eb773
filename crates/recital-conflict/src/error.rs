//! Error types for the recital board

use recital_core::domain::{DancerId, EventId, StoreError};
use thiserror::Error;

/// Errors that can occur while loading or editing a recital board
#[derive(Debug, Error)]
pub enum BoardError {
    /// No dancer with this id is on the board
    #[error("dancer not found: {0}")]
    UnknownDancer(DancerId),

    /// No event with this id is on the board
    #[error("event not found: {0}")]
    UnknownEvent(EventId),

    /// The board has not been loaded yet
    #[error("no recital selected; load the board first")]
    NoRecitalSelected,

    /// The store failed; any optimistic change has been reverted
    #[error(transparent)]
    Store(#[from] StoreError),
}
