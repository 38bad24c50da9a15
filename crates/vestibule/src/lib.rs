//! # Vestibule
//!
//! A lobby ("lounge") screen framework for multiplayer game clients.
//!
//! Vestibule owns the lobby session state machine: it reconciles the
//! asynchronous arrival of the room list, user-driven join attempts
//! with their own asynchronous completions, and screen lifecycle
//! transitions into one coherent busy signal and a race-free path
//! into a room. Rendering, navigation, audio, and networking stay
//! behind injected interfaces.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use vestibule::prelude::*;
//!
//! // Implement DiscoverySource and RoomService over your backend,
//! // then:
//! // let stack = SharedScreenStack::new();
//! // let lounge = stack.push_lounge();
//! // let mut controller = LobbySessionController::new(
//! //     lounge, service, selection, stack.clone(),
//! //     spinner, search, room_list,
//! // );
//! // controller.on_enter(None);
//! ```

mod controller;
mod error;

pub use controller::{LobbySessionController, wire_room_scroll};
pub use error::VestibuleError;

pub use vestibule_catalogue::{
    CatalogueEvent, DiscoveryError, DiscoverySource, RoomCatalogue, RoomFilter, spawn_discovery,
};
pub use vestibule_join::{JoinCoordinator, JoinError, JoinOutcome, RoomService};
pub use vestibule_model::{Room, RoomId, RoomSettings, Visibility};
pub use vestibule_observable::{Observable, Subscription};
pub use vestibule_screen::{
    AmbientAudio, LoadingLayer, NavigationHost, RoomListView, ScreenId, ScreenKind,
    ScreenLifecycle, ScreenStack, SearchInput, SharedScreenStack,
};

/// One-stop imports for hosts wiring up a lounge.
pub mod prelude {
    pub use crate::{
        AmbientAudio, CatalogueEvent, DiscoveryError, DiscoverySource, JoinError, JoinOutcome,
        LoadingLayer, LobbySessionController, NavigationHost, Observable, Room, RoomCatalogue,
        RoomFilter, RoomId, RoomListView, RoomService, RoomSettings, ScreenId, ScreenKind,
        ScreenStack, SearchInput, SharedScreenStack, Subscription, VestibuleError, Visibility,
        spawn_discovery, wire_room_scroll,
    };
}
