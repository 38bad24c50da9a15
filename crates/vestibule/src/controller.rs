//! The lobby session controller: the single authority for the
//! lounge's busy state and lifecycle-driven side effects.

use std::sync::Arc;

use tokio::sync::mpsc;

use vestibule_catalogue::{CatalogueEvent, RoomCatalogue, RoomFilter};
use vestibule_join::{JoinCoordinator, JoinError, JoinOutcome, RoomService};
use vestibule_model::Room;
use vestibule_observable::{Observable, Subscription};
use vestibule_screen::{
    AmbientAudio, LoadingLayer, NavigationHost, RoomListView, ScreenId, SearchInput,
};

/// Wires the reactive selection rule: whenever the selection changes
/// to a room present in the rendered list, bring it into view.
///
/// A selected room the view does not currently render (hidden by the
/// filter, or a local draft) is a no-op, not an error.
pub fn wire_room_scroll<V>(
    selection: &Observable<Option<Arc<Room>>>,
    mut view: V,
) -> Subscription
where
    V: RoomListView + Send + 'static,
{
    selection.subscribe(false, move |selected| {
        if let Some(room) = selected {
            if let Some(index) = view.locate(room) {
                view.bring_into_view(index);
            }
        }
    })
}

/// Drives one lounge visit: room listing arrival, join attempts, and
/// screen lifecycle, reconciled into a single busy signal.
///
/// The controller lives on one logical UI thread. Asynchronous
/// collaborators (discovery, the join service) complete by delivering
/// onto channels the owning task drains through
/// [`apply_catalogue_event`](Self::apply_catalogue_event) and
/// [`process_next_join`](Self::process_next_join), so every state
/// mutation happens in one total order.
///
/// A controller is built per lounge visit and discarded on navigation
/// away; [`open_room`](Self::open_room) stops acting the moment the
/// screen is no longer current.
pub struct LobbySessionController<S, N, L, F>
where
    S: RoomService,
    N: NavigationHost,
    L: LoadingLayer,
    F: SearchInput,
{
    screen: ScreenId,
    nav: N,
    loading: L,
    search: F,
    audio: Option<Box<dyn AmbientAudio + Send>>,

    /// Shared slot siblings read; only this controller writes it.
    selection: Observable<Option<Arc<Room>>>,
    catalogue: RoomCatalogue,
    join: JoinCoordinator<S>,
    join_rx: mpsc::UnboundedReceiver<JoinOutcome>,

    /// Liveness flag: flipped false exactly once, on exit.
    active: bool,

    /// Keeps the selection→scroll rule attached for the controller's
    /// lifetime.
    _scroll: Subscription,
}

impl<S, N, L, F> LobbySessionController<S, N, L, F>
where
    S: RoomService,
    N: NavigationHost,
    L: LoadingLayer,
    F: SearchInput,
{
    /// Creates a controller for the lounge screen `screen`.
    ///
    /// `selection` is the externally owned room-selection slot shared
    /// with sibling components. The loading indicator starts visible:
    /// the catalogue has not completed its initial fetch yet.
    pub fn new<V>(
        screen: ScreenId,
        service: Arc<S>,
        selection: Observable<Option<Arc<Room>>>,
        nav: N,
        loading: L,
        search: F,
        view: V,
    ) -> Self
    where
        V: RoomListView + Send + 'static,
    {
        let (join_tx, join_rx) = mpsc::unbounded_channel();
        let scroll = wire_room_scroll(&selection, view);

        let mut controller = Self {
            screen,
            nav,
            loading,
            search,
            audio: None,
            selection,
            catalogue: RoomCatalogue::new(),
            join: JoinCoordinator::new(service, join_tx),
            join_rx,
            active: true,
            _scroll: scroll,
        };
        controller.refresh_busy();
        controller
    }

    /// Attaches the optional ambient audio collaborator.
    pub fn with_audio(mut self, audio: impl AmbientAudio + Send + 'static) -> Self {
        self.audio = Some(Box::new(audio));
        self
    }

    // -- Screen lifecycle ---------------------------------------------------

    /// Called when the lounge is first presented.
    pub fn on_enter(&mut self, _previous: Option<ScreenId>) {
        tracing::debug!(screen = %self.screen, "entering lounge");
        self.search.take_focus();
        self.search.set_hold_focus(true);
    }

    /// Called when a pushed screen pops back to the lounge.
    pub fn on_resume(&mut self, _previous: Option<ScreenId>) {
        let confirmed = self
            .selection
            .get()
            .is_some_and(|room| room.is_confirmed());
        if !confirmed {
            // The detail panel downstream always needs a target; an
            // unconfirmed leftover draft is replaced along with an
            // empty slot.
            self.selection.set(Some(Arc::new(Room::default())));
        }

        if let Some(audio) = &mut self.audio {
            audio.ensure_playing_something();
        }

        self.search.set_hold_focus(true);
    }

    /// Called when a pushed screen covers the lounge.
    pub fn on_suspend(&mut self, _next: Option<ScreenId>) {
        self.search.set_hold_focus(false);
    }

    /// Called when the lounge is popped. Returns whether navigation
    /// may proceed; it always may.
    ///
    /// After this, the controller mutates nothing: stale completions
    /// and clicks fall through [`open_room`](Self::open_room)'s guard.
    pub fn on_exit(&mut self, _next: Option<ScreenId>) -> bool {
        self.search.set_hold_focus(false);
        self.active = false;
        true
    }

    // -- Room flows ---------------------------------------------------------

    /// Sets the selection to `room` and pushes its detail screen.
    ///
    /// A room can be clicked several times in quick succession before
    /// the transition lands; invocations after this screen stopped
    /// being current are dropped silently.
    pub fn open_room(&mut self, room: Arc<Room>) {
        if !self.active || !self.nav.is_current(self.screen) {
            tracing::debug!(room = %room.name, "stale open request dropped");
            return;
        }

        self.selection.set(Some(Arc::clone(&room)));
        self.nav.push_room(room);
    }

    /// Starts a join attempt for `room`. The loading indicator becomes
    /// visible immediately; the attempt completes through
    /// [`process_next_join`](Self::process_next_join) or
    /// [`process_pending_joins`](Self::process_pending_joins).
    ///
    /// # Errors
    /// Returns [`JoinError::AttemptInFlight`] while another attempt is
    /// outstanding.
    pub fn request_join(&mut self, room: Arc<Room>) -> Result<(), JoinError> {
        self.join.begin(room)?;
        self.refresh_busy();
        Ok(())
    }

    /// Creates a local draft copying `source`'s settings (not its
    /// identity) and opens it. Nothing is submitted to the discovery
    /// source yet.
    pub fn duplicate_requested(&mut self, source: &Room) {
        let copy = Arc::new(source.duplicate());
        tracing::info!(room = %copy.name, "room duplicated");
        self.open_room(copy);
    }

    // -- Event intake -------------------------------------------------------

    /// Feeds a discovery snapshot into the catalogue.
    ///
    /// The busy state is recomputed only when this batch completed the
    /// initial fetch; later refreshes cannot change it.
    pub fn apply_rooms(&mut self, batch: Vec<Room>) {
        if self.catalogue.apply_batch(batch) {
            self.refresh_busy();
        }
    }

    /// Applies one event from a discovery feed channel.
    pub fn apply_catalogue_event(&mut self, event: CatalogueEvent) {
        match event {
            CatalogueEvent::Batch(batch) => self.apply_rooms(batch),
            CatalogueEvent::Failed(error) => {
                tracing::warn!(error = %error, "room discovery failed, keeping last listing");
            }
        }
    }

    /// Waits for and processes the next join completion.
    ///
    /// Returns `false` if the outcome channel has closed.
    pub async fn process_next_join(&mut self) -> bool {
        match self.join_rx.recv().await {
            Some(outcome) => {
                self.handle_join_outcome(outcome);
                true
            }
            None => false,
        }
    }

    /// Processes any join completions that have already arrived.
    pub fn process_pending_joins(&mut self) {
        while let Ok(outcome) = self.join_rx.try_recv() {
            self.handle_join_outcome(outcome);
        }
    }

    fn handle_join_outcome(&mut self, outcome: JoinOutcome) {
        match outcome.result {
            Ok(confirmed) => {
                tracing::info!(
                    room = %outcome.requested.name,
                    confirmed = ?confirmed.id,
                    "join succeeded"
                );
                self.open_room(Arc::clone(&outcome.requested));
            }
            Err(reason) => {
                // The reason is surfaced by whoever renders errors; here
                // it only ends the attempt.
                tracing::warn!(error = %reason, "join failed, staying in the lounge");
            }
        }

        // The push above must land before the attempt clears.
        self.join.finish();
        self.refresh_busy();
    }

    // -- Derived state ------------------------------------------------------

    /// Recomputes the derived busy state and drives the loading layer.
    ///
    /// The indicator is visible iff a join is in flight or the initial
    /// room fetch has not completed. Nothing else may touch it.
    fn refresh_busy(&mut self) {
        if self.join.is_joining() || !self.catalogue.is_ready() {
            self.loading.show();
        } else {
            self.loading.hide();
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// The id of the screen this controller drives.
    pub fn screen(&self) -> ScreenId {
        self.screen
    }

    /// Shared handle to the room-selection slot.
    pub fn selection(&self) -> Observable<Option<Arc<Room>>> {
        self.selection.clone()
    }

    /// The room catalogue backing the list.
    pub fn catalogue(&self) -> &RoomCatalogue {
        &self.catalogue
    }

    /// Replaces the catalogue filter.
    pub fn set_filter(&mut self, filter: RoomFilter) {
        self.catalogue.set_filter(filter);
    }

    /// The derived busy state: join in flight, or initial fetch still
    /// pending. The loading indicator always mirrors this.
    pub fn is_busy(&self) -> bool {
        self.join.is_joining() || !self.catalogue.is_ready()
    }

    /// Whether a join attempt is outstanding.
    pub fn is_joining(&self) -> bool {
        self.join.is_joining()
    }

    /// Whether this controller still accepts transitions.
    pub fn is_active(&self) -> bool {
        self.active
    }
}
