//! Collaborator seams consumed by the lounge controller.
//!
//! Rendering, focus, audio, and the loading spinner are someone
//! else's widgets. The controller only drives them through these
//! traits, so any UI framework (or a test fake) can sit on the other
//! side.

use std::sync::Arc;

use vestibule_model::Room;

use crate::ScreenId;

/// The navigation capabilities the lounge needs from its host.
pub trait NavigationHost {
    /// Whether `screen` is the topmost screen.
    fn is_current(&self, screen: ScreenId) -> bool;

    /// Pushes a room detail screen for `room` on top of the stack.
    fn push_room(&mut self, room: Arc<Room>);
}

/// The loading indicator overlaying the room list.
pub trait LoadingLayer {
    fn show(&mut self);
    fn hide(&mut self);
}

/// The filter/search text field.
pub trait SearchInput {
    /// Grabs input focus now.
    fn take_focus(&mut self);

    /// While held, the field re-acquires focus whenever it is lost.
    fn set_hold_focus(&mut self, hold: bool);
}

/// Ambient music control. Optional collaborator: the lounge works
/// without one.
pub trait AmbientAudio {
    /// Starts playback unless something is already playing.
    fn ensure_playing_something(&mut self);
}

/// The rendered room list.
pub trait RoomListView {
    /// Index of the rendered item backed by exactly this `room`
    /// reference, if it is currently rendered.
    fn locate(&self, room: &Arc<Room>) -> Option<usize>;

    /// Scrolls the item at `index` into view.
    fn bring_into_view(&mut self, index: usize);
}
