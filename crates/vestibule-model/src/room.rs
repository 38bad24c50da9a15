//! Room types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique identifier for a room, assigned by the server.
///
/// Local drafts (newly created or duplicated rooms) carry no id
/// until the server accepts them, which is why [`Room::id`] is an
/// `Option`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", self.0)
    }
}

/// Who can see and join a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// User-editable room settings.
///
/// Copied verbatim when a room is duplicated: settings travel with
/// the copy, identity does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RoomSettings {
    #[serde(default)]
    pub visibility: Visibility,

    /// Maximum participants. `None` means the server default.
    #[serde(default)]
    pub max_players: Option<u32>,

    /// Join password, if the room is locked.
    #[serde(default)]
    pub password: Option<String>,
}

/// A joinable multiplayer session descriptor.
///
/// The lounge never owns rooms; it passes them around as
/// `Arc<Room>`, and pointer identity is what "the same room" means
/// for selection tracking. Two snapshots of the same server room are
/// distinct references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Room {
    /// Server-assigned identity. `None` for local drafts.
    #[serde(default)]
    pub id: Option<RoomId>,

    pub name: String,

    #[serde(default)]
    pub settings: RoomSettings,

    /// Current occupancy as reported by the discovery source.
    #[serde(default)]
    pub player_count: u32,
}

impl Room {
    /// Creates a named local draft: no identity, default settings,
    /// nobody in it.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            settings: RoomSettings::default(),
            player_count: 0,
        }
    }

    /// Whether the server has assigned this room an identity.
    pub fn is_confirmed(&self) -> bool {
        self.id.is_some()
    }

    /// Creates a fresh draft copying this room's settings but not its
    /// identity or occupancy. The copy is named after the original.
    pub fn duplicate(&self) -> Self {
        Self {
            id: None,
            name: format!("Copy of {}", self.name),
            settings: self.settings.clone(),
            player_count: 0,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
