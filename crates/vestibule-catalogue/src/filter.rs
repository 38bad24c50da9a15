//! Filter criteria for the catalogue's visible view.

use vestibule_model::Room;

/// Narrows which known rooms the catalogue presents.
///
/// The search field UI lives outside this crate; the catalogue only
/// needs the criteria it types out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomFilter {
    /// Case-insensitive substring match on the room name. Empty
    /// matches everything.
    pub query: String,
}

impl RoomFilter {
    /// A filter matching rooms whose name contains `query`.
    pub fn named(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    /// Whether `room` passes this filter.
    pub fn matches(&self, room: &Room) -> bool {
        self.query.is_empty()
            || room
                .name
                .to_lowercase()
                .contains(&self.query.to_lowercase())
    }
}
