//! Room data model for Vestibule.
//!
//! These are the types every other layer speaks: the room identity
//! newtype, the room descriptor itself, and its user-editable
//! settings. Rooms arrive from a remote discovery source as JSON, so
//! everything here carries serde derives and the wire shapes are
//! pinned by tests.

mod room;

pub use room::{Room, RoomId, RoomSettings, Visibility};
