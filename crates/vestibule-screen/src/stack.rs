//! Navigation stack: the screen state machine external to the lounge.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use vestibule_model::Room;

use crate::{NavigationHost, ScreenLifecycle};

/// Opaque identifier for a screen on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenId(u64);

impl ScreenId {
    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}", self.0)
    }
}

/// What a stack entry presents.
#[derive(Debug, Clone)]
pub enum ScreenKind {
    /// The lounge itself.
    Lounge,

    /// A room detail screen for the given room.
    RoomDetail(Arc<Room>),
}

struct Entry {
    id: ScreenId,
    kind: ScreenKind,
    lifecycle: ScreenLifecycle,
}

/// A minimal navigation stack.
///
/// Pushing suspends the previous top; popping exits the top and
/// resumes the screen below. The lounge controller only consumes the
/// [`NavigationHost`] slice of this; the stack itself belongs to the
/// host application, which may substitute its own.
pub struct ScreenStack {
    entries: Vec<Entry>,
    next_id: u64,
}

impl ScreenStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Pushes a lounge screen and returns its id.
    pub fn push_lounge(&mut self) -> ScreenId {
        self.push(ScreenKind::Lounge)
    }

    /// Pushes a screen of the given kind, suspending the previous top.
    pub fn push(&mut self, kind: ScreenKind) -> ScreenId {
        if let Some(top) = self.entries.last_mut() {
            if let Some(next) = top.lifecycle.suspend() {
                top.lifecycle = next;
            }
        }

        let id = ScreenId(self.next_id);
        self.next_id += 1;
        let lifecycle = ScreenLifecycle::Initial
            .enter()
            .expect("fresh screens always enter");
        self.entries.push(Entry {
            id,
            kind,
            lifecycle,
        });
        tracing::debug!(screen = %id, "screen pushed");
        id
    }

    /// Pops the top screen, resuming the one below. Returns the popped
    /// screen's id, or `None` if the stack is empty.
    pub fn pop(&mut self) -> Option<ScreenId> {
        let mut top = self.entries.pop()?;
        if let Some(next) = top.lifecycle.exit() {
            top.lifecycle = next;
        }
        if let Some(below) = self.entries.last_mut() {
            if let Some(next) = below.lifecycle.resume() {
                below.lifecycle = next;
            }
        }
        tracing::debug!(screen = %top.id, "screen popped");
        Some(top.id)
    }

    /// The topmost screen's id, if any.
    pub fn current(&self) -> Option<ScreenId> {
        self.entries.last().map(|e| e.id)
    }

    /// The topmost screen's kind, if any.
    pub fn current_kind(&self) -> Option<&ScreenKind> {
        self.entries.last().map(|e| &e.kind)
    }

    /// The lifecycle state of `screen`, if it is still on the stack.
    pub fn lifecycle_of(&self, screen: ScreenId) -> Option<ScreenLifecycle> {
        self.entries
            .iter()
            .find(|e| e.id == screen)
            .map(|e| e.lifecycle)
    }

    /// Number of screens on the stack.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ScreenStack {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationHost for ScreenStack {
    fn is_current(&self, screen: ScreenId) -> bool {
        self.current() == Some(screen)
    }

    fn push_room(&mut self, room: Arc<Room>) {
        self.push(ScreenKind::RoomDetail(room));
    }
}

/// Clonable handle to a [`ScreenStack`] shared between the host and
/// the screens living on it.
#[derive(Clone)]
pub struct SharedScreenStack {
    inner: Arc<Mutex<ScreenStack>>,
}

impl SharedScreenStack {
    /// Creates a handle to a fresh, empty stack.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ScreenStack::new())),
        }
    }

    /// Runs `f` with exclusive access to the stack.
    pub fn with<R>(&self, f: impl FnOnce(&mut ScreenStack) -> R) -> R {
        f(&mut self.lock())
    }

    /// Pushes a lounge screen and returns its id.
    pub fn push_lounge(&self) -> ScreenId {
        self.lock().push_lounge()
    }

    /// Pops the top screen.
    pub fn pop(&self) -> Option<ScreenId> {
        self.lock().pop()
    }

    /// The topmost screen's id, if any.
    pub fn current(&self) -> Option<ScreenId> {
        self.lock().current()
    }

    fn lock(&self) -> MutexGuard<'_, ScreenStack> {
        self.inner.lock().expect("screen stack lock poisoned")
    }
}

impl Default for SharedScreenStack {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationHost for SharedScreenStack {
    fn is_current(&self, screen: ScreenId) -> bool {
        self.lock().is_current(screen)
    }

    fn push_room(&mut self, room: Arc<Room>) {
        self.lock().push_room(room);
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_unique_ids() {
        let mut stack = ScreenStack::new();
        let a = stack.push_lounge();
        let b = stack.push(ScreenKind::RoomDetail(Arc::new(Room::new("Arena"))));
        assert_ne!(a, b);
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_push_suspends_previous_top() {
        let mut stack = ScreenStack::new();
        let lounge = stack.push_lounge();
        assert_eq!(stack.lifecycle_of(lounge), Some(ScreenLifecycle::Active));

        stack.push(ScreenKind::RoomDetail(Arc::new(Room::new("Arena"))));

        assert_eq!(stack.lifecycle_of(lounge), Some(ScreenLifecycle::Suspended));
        assert!(!stack.is_current(lounge));
    }

    #[test]
    fn test_pop_resumes_screen_below() {
        let mut stack = ScreenStack::new();
        let lounge = stack.push_lounge();
        let detail = stack.push(ScreenKind::RoomDetail(Arc::new(Room::new("Arena"))));

        assert_eq!(stack.pop(), Some(detail));

        assert_eq!(stack.lifecycle_of(lounge), Some(ScreenLifecycle::Active));
        assert!(stack.is_current(lounge));
    }

    #[test]
    fn test_pop_empty_stack_returns_none() {
        let mut stack = ScreenStack::new();
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_push_room_makes_detail_current() {
        let mut stack = ScreenStack::new();
        let lounge = stack.push_lounge();
        let room = Arc::new(Room::new("Arena"));

        stack.push_room(Arc::clone(&room));

        assert!(!stack.is_current(lounge));
        match stack.current_kind() {
            Some(ScreenKind::RoomDetail(pushed)) => {
                assert!(Arc::ptr_eq(pushed, &room));
            }
            other => panic!("expected a room detail on top, got {other:?}"),
        }
    }

    #[test]
    fn test_shared_stack_clones_see_one_stack() {
        let stack = SharedScreenStack::new();
        let mut handle = stack.clone();

        let lounge = stack.push_lounge();
        handle.push_room(Arc::new(Room::new("Arena")));

        assert!(!stack.is_current(lounge));
        assert_eq!(stack.with(|s| s.len()), 2);

        stack.pop();
        assert!(stack.is_current(lounge));
    }

    #[test]
    fn test_screen_id_display() {
        let mut stack = ScreenStack::new();
        let id = stack.push_lounge();
        assert_eq!(id.to_string(), "S-1");
        assert_eq!(id.into_inner(), 1);
    }
}
