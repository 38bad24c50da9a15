//! A scripted lounge session against an in-memory backend.
//!
//! Run with `RUST_LOG=debug` to watch the controller's internal
//! transitions as well as the UI collaborator calls.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;
use vestibule::prelude::*;

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// Serves a fixed room listing and joins after a simulated round trip.
struct DemoBackend;

impl DiscoverySource for DemoBackend {
    async fn fetch_rooms(&self) -> Result<Vec<Room>, DiscoveryError> {
        tokio::time::sleep(Duration::from_millis(150)).await;
        Ok(vec![
            Room {
                id: Some(RoomId(1)),
                player_count: 3,
                ..Room::new("Grand Arena")
            },
            Room {
                id: Some(RoomId(2)),
                player_count: 1,
                ..Room::new("Quick Match")
            },
            Room {
                id: Some(RoomId(3)),
                settings: RoomSettings {
                    visibility: Visibility::Private,
                    max_players: Some(4),
                    password: Some("sesame".into()),
                },
                ..Room::new("Friends Only")
            },
        ])
    }
}

impl RoomService for DemoBackend {
    async fn join(&self, room: Arc<Room>) -> Result<Arc<Room>, JoinError> {
        tokio::time::sleep(Duration::from_millis(200)).await;
        match room.id {
            Some(RoomId(3)) => Err(JoinError::Rejected("password required".into())),
            Some(_) => {
                let mut confirmed = (*room).clone();
                confirmed.player_count += 1;
                Ok(Arc::new(confirmed))
            }
            None => Err(JoinError::Rejected("draft rooms must be created first".into())),
        }
    }
}

// ---------------------------------------------------------------------------
// Log-only UI collaborators
// ---------------------------------------------------------------------------

struct LogSpinner;

impl LoadingLayer for LogSpinner {
    fn show(&mut self) {
        tracing::info!("[ui] loading spinner shown");
    }

    fn hide(&mut self) {
        tracing::info!("[ui] loading spinner hidden");
    }
}

struct LogSearch;

impl SearchInput for LogSearch {
    fn take_focus(&mut self) {
        tracing::info!("[ui] search field focused");
    }

    fn set_hold_focus(&mut self, hold: bool) {
        tracing::info!(hold, "[ui] search hold-focus");
    }
}

struct LogJukebox;

impl AmbientAudio for LogJukebox {
    fn ensure_playing_something(&mut self) {
        tracing::info!("[audio] ambient track playing");
    }
}

#[derive(Clone, Default)]
struct DemoList {
    rendered: Arc<Mutex<Vec<Arc<Room>>>>,
}

impl DemoList {
    fn render(&self, rooms: &[Arc<Room>]) {
        *self.rendered.lock().expect("render list lock poisoned") = rooms.to_vec();
    }
}

impl RoomListView for DemoList {
    fn locate(&self, room: &Arc<Room>) -> Option<usize> {
        self.rendered
            .lock()
            .expect("render list lock poisoned")
            .iter()
            .position(|r| Arc::ptr_eq(r, room))
    }

    fn bring_into_view(&mut self, index: usize) {
        tracing::info!(index, "[ui] room scrolled into view");
    }
}

// ---------------------------------------------------------------------------
// Scripted session
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let backend = Arc::new(DemoBackend);

    let stack = SharedScreenStack::new();
    let lounge = stack.push_lounge();
    let selection: Observable<Option<Arc<Room>>> = Observable::new(None);
    let view = DemoList::default();

    let mut controller = LobbySessionController::new(
        lounge,
        Arc::clone(&backend),
        selection.clone(),
        stack.clone(),
        LogSpinner,
        LogSearch,
        view.clone(),
    )
    .with_audio(LogJukebox);

    controller.on_enter(None);

    // Room discovery feeds the catalogue on a fixed cadence.
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let _discovery = spawn_discovery(Arc::clone(&backend), Duration::from_secs(2), events_tx);

    if let Some(event) = events_rx.recv().await {
        controller.apply_catalogue_event(event);
        view.render(controller.catalogue().rooms());
    }
    tracing::info!(
        rooms = controller.catalogue().len(),
        busy = controller.is_busy(),
        "lounge ready"
    );

    // Narrow the listing, then clear the filter again.
    controller.set_filter(RoomFilter::named("arena"));
    tracing::info!(rooms = controller.catalogue().len(), "filtered to 'arena'");
    controller.set_filter(RoomFilter::default());
    view.render(controller.catalogue().rooms());

    // A join that gets refused: the password-protected room.
    let locked = Arc::clone(&controller.catalogue().rooms()[2]);
    controller.request_join(locked)?;
    controller.process_next_join().await;
    tracing::info!(busy = controller.is_busy(), "refused, still in the lounge");

    // A join that succeeds and pushes the room detail screen.
    let open = Arc::clone(&controller.catalogue().rooms()[0]);
    controller.request_join(open)?;
    controller.process_next_join().await;

    if let Some(ScreenKind::RoomDetail(room)) = stack.with(|s| s.current_kind().cloned()) {
        tracing::info!(room = %room.name, "entered room detail");
    }
    controller.on_suspend(None);

    // Coming back from the detail screen: the confirmed selection is
    // kept and the ambient track is nudged.
    stack.pop();
    controller.on_resume(None);
    tracing::info!(
        selected = ?selection.get().map(|r| r.name.clone()),
        "back in the lounge"
    );

    Ok(())
}
