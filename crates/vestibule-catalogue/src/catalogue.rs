//! The room catalogue: known rooms, filtered view, readiness.

use std::sync::Arc;

use vestibule_model::Room;
use vestibule_observable::Observable;

use crate::RoomFilter;

/// The filtered, ordered list of currently known rooms.
///
/// Owned by whoever owns the lounge (single-task ownership, no
/// internal locking); sibling components observe readiness through
/// the shared handle returned by [`readiness`](Self::readiness).
pub struct RoomCatalogue {
    /// The discovery source's latest snapshot, in source order.
    known: Vec<Arc<Room>>,
    /// Derived from `known` whenever the snapshot or filter changes.
    visible: Vec<Arc<Room>>,
    filter: RoomFilter,
    /// Monotonic per catalogue lifetime: flips true on the first
    /// batch and never back.
    ready: Observable<bool>,
}

impl RoomCatalogue {
    /// Creates an empty catalogue that has not completed its initial
    /// fetch.
    pub fn new() -> Self {
        Self {
            known: Vec::new(),
            visible: Vec::new(),
            filter: RoomFilter::default(),
            ready: Observable::new(false),
        }
    }

    /// Replaces the known set with the source's current snapshot.
    ///
    /// `Arc` identity is preserved for rooms unchanged since the
    /// previous batch, so references held by the selection slot or a
    /// rendered list stay comparable across refreshes.
    ///
    /// Returns `true` exactly once per catalogue lifetime: when this
    /// batch completed the initial fetch.
    pub fn apply_batch(&mut self, batch: Vec<Room>) -> bool {
        let previous = std::mem::take(&mut self.known);
        self.known = batch
            .into_iter()
            .map(|incoming| {
                previous
                    .iter()
                    .find(|existing| {
                        existing.id.is_some()
                            && existing.id == incoming.id
                            && existing.as_ref() == &incoming
                    })
                    .map(Arc::clone)
                    .unwrap_or_else(|| Arc::new(incoming))
            })
            .collect();
        self.refresh_view();

        let first = !self.ready.get();
        if first {
            tracing::info!(rooms = self.known.len(), "initial room listing received");
            self.ready.set(true);
        } else {
            tracing::debug!(rooms = self.known.len(), "room listing refreshed");
        }
        first
    }

    /// Whether the initial fetch has completed.
    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }

    /// Shared handle to the readiness signal, for sibling subscribers.
    pub fn readiness(&self) -> Observable<bool> {
        self.ready.clone()
    }

    /// Replaces the filter and re-derives the visible view.
    pub fn set_filter(&mut self, filter: RoomFilter) {
        self.filter = filter;
        self.refresh_view();
    }

    /// The current filter.
    pub fn filter(&self) -> &RoomFilter {
        &self.filter
    }

    /// The filtered view, in source order.
    pub fn rooms(&self) -> &[Arc<Room>] {
        &self.visible
    }

    /// Index of exactly this room reference in the visible view.
    pub fn position_of(&self, room: &Arc<Room>) -> Option<usize> {
        self.visible.iter().position(|r| Arc::ptr_eq(r, room))
    }

    /// Number of visible rooms.
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// Whether the visible view is empty.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Re-derives the visible view from `known` and the current filter,
    /// preserving source order.
    fn refresh_view(&mut self) {
        self.visible = self
            .known
            .iter()
            .filter(|room| self.filter.matches(room))
            .map(Arc::clone)
            .collect();
    }
}

impl Default for RoomCatalogue {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vestibule_model::RoomId;

    fn remote(id: u64, name: &str) -> Room {
        Room {
            id: Some(RoomId(id)),
            ..Room::new(name)
        }
    }

    #[test]
    fn test_new_catalogue_is_not_ready() {
        let catalogue = RoomCatalogue::new();
        assert!(!catalogue.is_ready());
        assert!(catalogue.is_empty());
    }

    #[test]
    fn test_first_batch_flips_readiness_once() {
        let mut catalogue = RoomCatalogue::new();

        assert!(catalogue.apply_batch(vec![remote(1, "Arena")]));
        assert!(catalogue.is_ready());

        // Later batches refresh the list but never re-report readiness.
        assert!(!catalogue.apply_batch(vec![remote(2, "Quick Match")]));
        assert!(catalogue.is_ready());
    }

    #[test]
    fn test_empty_first_batch_still_completes_the_fetch() {
        // "No rooms right now" is a completed fetch, not a pending one.
        let mut catalogue = RoomCatalogue::new();
        assert!(catalogue.apply_batch(Vec::new()));
        assert!(catalogue.is_ready());
        assert!(catalogue.is_empty());
    }

    #[test]
    fn test_readiness_observable_fires_on_first_batch() {
        let mut catalogue = RoomCatalogue::new();
        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = std::sync::Arc::clone(&seen);
        let _sub = catalogue
            .readiness()
            .subscribe(false, move |ready: &bool| sink.lock().unwrap().push(*ready));

        catalogue.apply_batch(vec![remote(1, "Arena")]);

        assert_eq!(*seen.lock().unwrap(), vec![true]);
    }

    #[test]
    fn test_unchanged_rooms_keep_arc_identity_across_batches() {
        let mut catalogue = RoomCatalogue::new();
        catalogue.apply_batch(vec![remote(1, "Arena"), remote(2, "Quick Match")]);
        let before = Arc::clone(&catalogue.rooms()[0]);

        catalogue.apply_batch(vec![remote(1, "Arena"), remote(2, "Quick Match")]);

        assert!(Arc::ptr_eq(&before, &catalogue.rooms()[0]));
    }

    #[test]
    fn test_changed_room_gets_fresh_reference() {
        let mut catalogue = RoomCatalogue::new();
        catalogue.apply_batch(vec![remote(1, "Arena")]);
        let before = Arc::clone(&catalogue.rooms()[0]);

        let mut renamed = remote(1, "Arena");
        renamed.player_count = 4;
        catalogue.apply_batch(vec![renamed]);

        assert!(!Arc::ptr_eq(&before, &catalogue.rooms()[0]));
        assert_eq!(catalogue.rooms()[0].player_count, 4);
    }

    #[test]
    fn test_filter_narrows_visible_view() {
        let mut catalogue = RoomCatalogue::new();
        catalogue.apply_batch(vec![remote(1, "Grand Arena"), remote(2, "Quick Match")]);

        catalogue.set_filter(RoomFilter::named("arena"));

        assert_eq!(catalogue.len(), 1);
        assert_eq!(catalogue.rooms()[0].name, "Grand Arena");

        catalogue.set_filter(RoomFilter::default());
        assert_eq!(catalogue.len(), 2);
    }

    #[test]
    fn test_filter_applies_to_later_batches_too() {
        let mut catalogue = RoomCatalogue::new();
        catalogue.set_filter(RoomFilter::named("arena"));

        catalogue.apply_batch(vec![remote(1, "Grand Arena"), remote(2, "Quick Match")]);

        assert_eq!(catalogue.len(), 1);
    }

    #[test]
    fn test_position_of_matches_by_reference_not_value() {
        let mut catalogue = RoomCatalogue::new();
        catalogue.apply_batch(vec![remote(1, "Arena")]);

        let listed = Arc::clone(&catalogue.rooms()[0]);
        assert_eq!(catalogue.position_of(&listed), Some(0));

        // An equal but distinct snapshot is not "the same room".
        let twin = Arc::new(remote(1, "Arena"));
        assert_eq!(catalogue.position_of(&twin), None);
    }

    #[test]
    fn test_room_leaving_the_snapshot_is_dropped() {
        let mut catalogue = RoomCatalogue::new();
        catalogue.apply_batch(vec![remote(1, "Arena"), remote(2, "Quick Match")]);

        catalogue.apply_batch(vec![remote(2, "Quick Match")]);

        assert_eq!(catalogue.len(), 1);
        assert_eq!(catalogue.rooms()[0].id, Some(RoomId(2)));
    }
}
