//! The join coordinator: one in-flight attempt, one delivered outcome.

use std::sync::Arc;

use tokio::sync::mpsc;
use vestibule_model::Room;

use crate::{JoinError, RoomService};

/// The result of a join attempt, delivered on the coordinator's
/// outcome channel.
#[derive(Debug)]
pub struct JoinOutcome {
    /// The room the attempt was issued for.
    pub requested: Arc<Room>,

    /// The server's confirmed descriptor on success, or the reason
    /// the service gave.
    pub result: Result<Arc<Room>, JoinError>,
}

impl JoinOutcome {
    /// Whether the attempt succeeded.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Orchestrates join attempts against a [`RoomService`].
///
/// At most one attempt is outstanding at a time; a second
/// [`begin`](Self::begin) while one is in flight is rejected with
/// [`JoinError::AttemptInFlight`]. Each attempt delivers exactly one
/// [`JoinOutcome`] on the channel handed to [`new`](Self::new), which
/// is what keeps completions on the owner's logical thread instead of
/// whatever task the service resolved on.
pub struct JoinCoordinator<S: RoomService> {
    service: Arc<S>,
    outcomes: mpsc::UnboundedSender<JoinOutcome>,
    in_flight: bool,
}

impl<S: RoomService> JoinCoordinator<S> {
    /// Creates a coordinator delivering outcomes on `outcomes`.
    pub fn new(service: Arc<S>, outcomes: mpsc::UnboundedSender<JoinOutcome>) -> Self {
        Self {
            service,
            outcomes,
            in_flight: false,
        }
    }

    /// Starts a join attempt for `room`.
    ///
    /// # Errors
    /// Returns [`JoinError::AttemptInFlight`] if an attempt is
    /// already outstanding.
    pub fn begin(&mut self, room: Arc<Room>) -> Result<(), JoinError> {
        if self.in_flight {
            return Err(JoinError::AttemptInFlight);
        }
        self.in_flight = true;

        tracing::info!(room = %room.name, "join attempt started");

        let service = Arc::clone(&self.service);
        let outcomes = self.outcomes.clone();
        tokio::spawn(async move {
            let result = service.join(Arc::clone(&room)).await;
            let outcome = JoinOutcome {
                requested: room,
                result,
            };
            // The receiver disappears when the lounge is torn down; a
            // completion landing after that is dropped, not an error.
            if outcomes.send(outcome).is_err() {
                tracing::debug!("join outcome arrived after the lounge went away");
            }
        });

        Ok(())
    }

    /// Marks the outstanding attempt as fully processed.
    ///
    /// The owner calls this after acting on the delivered
    /// [`JoinOutcome`], so any follow-up (the screen push on success)
    /// lands before the in-flight flag clears.
    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    /// Whether an attempt is currently outstanding.
    pub fn is_joining(&self) -> bool {
        self.in_flight
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vestibule_model::RoomId;

    /// Confirms every join with a server-assigned id.
    struct AcceptingService;

    impl RoomService for AcceptingService {
        async fn join(&self, room: Arc<Room>) -> Result<Arc<Room>, JoinError> {
            let mut confirmed = (*room).clone();
            confirmed.id = Some(RoomId(99));
            Ok(Arc::new(confirmed))
        }
    }

    /// Refuses every join.
    struct RefusingService;

    impl RoomService for RefusingService {
        async fn join(&self, _room: Arc<Room>) -> Result<Arc<Room>, JoinError> {
            Err(JoinError::Unavailable("timeout".into()))
        }
    }

    #[tokio::test]
    async fn test_begin_delivers_success_outcome() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut coordinator = JoinCoordinator::new(Arc::new(AcceptingService), tx);
        let room = Arc::new(Room::new("Arena"));

        coordinator.begin(Arc::clone(&room)).unwrap();
        assert!(coordinator.is_joining());

        let outcome = rx.recv().await.expect("exactly one outcome");
        assert!(Arc::ptr_eq(&outcome.requested, &room));
        assert_eq!(outcome.result.unwrap().id, Some(RoomId(99)));
    }

    #[tokio::test]
    async fn test_begin_delivers_failure_outcome() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut coordinator = JoinCoordinator::new(Arc::new(RefusingService), tx);

        coordinator.begin(Arc::new(Room::new("Arena"))).unwrap();

        let outcome = rx.recv().await.expect("exactly one outcome");
        assert!(matches!(outcome.result, Err(JoinError::Unavailable(_))));
        assert!(!outcome.is_success());
    }

    #[tokio::test]
    async fn test_second_begin_while_in_flight_is_rejected() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut coordinator = JoinCoordinator::new(Arc::new(AcceptingService), tx);
        let room = Arc::new(Room::new("Arena"));

        coordinator.begin(Arc::clone(&room)).unwrap();
        let second = coordinator.begin(Arc::clone(&room));
        assert!(matches!(second, Err(JoinError::AttemptInFlight)));

        // Still exactly one outcome for the one accepted attempt.
        rx.recv().await.expect("first attempt outcome");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_in_flight_clears_only_on_finish() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut coordinator = JoinCoordinator::new(Arc::new(AcceptingService), tx);

        coordinator.begin(Arc::new(Room::new("Arena"))).unwrap();
        let _outcome = rx.recv().await.expect("outcome");

        // Delivery alone is not completion; the owner finishes after
        // it has acted on the outcome.
        assert!(coordinator.is_joining());
        coordinator.finish();
        assert!(!coordinator.is_joining());
    }

    #[tokio::test]
    async fn test_new_attempt_allowed_after_finish() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut coordinator = JoinCoordinator::new(Arc::new(RefusingService), tx);

        coordinator.begin(Arc::new(Room::new("Arena"))).unwrap();
        rx.recv().await.expect("first outcome");
        coordinator.finish();

        coordinator.begin(Arc::new(Room::new("Arena"))).unwrap();
        rx.recv().await.expect("second outcome");
    }

    #[tokio::test]
    async fn test_late_completion_with_dropped_receiver_is_tolerated() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut coordinator = JoinCoordinator::new(Arc::new(AcceptingService), tx);

        coordinator.begin(Arc::new(Room::new("Arena"))).unwrap();
        drop(rx);

        // Give the spawned attempt time to resolve against the dead
        // channel; nothing should panic.
        tokio::task::yield_now().await;
    }
}
