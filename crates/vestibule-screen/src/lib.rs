//! Screen and navigation primitives for Vestibule.
//!
//! The lounge controller doesn't depend on any particular UI
//! framework. This crate holds what it needs instead: the screen
//! lifecycle state machine, a minimal navigation stack the host can
//! use (or replace), and the collaborator traits behind which the
//! real widgets live.
//!
//! # Key types
//!
//! - [`ScreenLifecycle`] — lifecycle state machine
//! - [`ScreenStack`] / [`SharedScreenStack`] — navigation stack and its
//!   shared handle
//! - [`NavigationHost`], [`LoadingLayer`], [`SearchInput`],
//!   [`AmbientAudio`], [`RoomListView`] — the seams the controller
//!   drives

mod collaborators;
mod lifecycle;
mod stack;

pub use collaborators::{AmbientAudio, LoadingLayer, NavigationHost, RoomListView, SearchInput};
pub use lifecycle::ScreenLifecycle;
pub use stack::{ScreenId, ScreenKind, ScreenStack, SharedScreenStack};
