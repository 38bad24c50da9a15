//! Join coordination for Vestibule.
//!
//! Joining a room is an asynchronous call against an external service
//! that may refuse or fail. This crate holds the seam (the
//! [`RoomService`] trait) and the [`JoinCoordinator`] that keeps at
//! most one attempt in flight and delivers exactly one
//! [`JoinOutcome`] per attempt back onto the lounge's logical thread.

mod coordinator;
mod error;
mod service;

pub use coordinator::{JoinCoordinator, JoinOutcome};
pub use error::JoinError;
pub use service::RoomService;
