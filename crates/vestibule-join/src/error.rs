//! Error types for the join layer.

use vestibule_model::RoomId;

/// Errors that can occur when joining a room.
#[derive(Debug, thiserror::Error)]
pub enum JoinError {
    /// The room has no free slots.
    #[error("room {0} is full")]
    RoomFull(RoomId),

    /// The room no longer exists on the service.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// The service could not be reached.
    #[error("join service unavailable: {0}")]
    Unavailable(String),

    /// The service refused the join (wrong password, banned, ...).
    #[error("join rejected: {0}")]
    Rejected(String),

    /// A join attempt is already outstanding on this coordinator.
    #[error("a join attempt is already in flight")]
    AttemptInFlight,
}
