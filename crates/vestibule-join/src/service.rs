//! The join seam: where join attempts actually go.

use std::future::Future;
use std::sync::Arc;

use vestibule_model::Room;

use crate::JoinError;

/// Attempts to join a room on an external service.
///
/// Vestibule doesn't speak any particular matchmaking protocol.
/// Implement this trait over your service (an HTTP endpoint, a
/// socket RPC, an in-memory fake in tests) and the
/// [`JoinCoordinator`](crate::JoinCoordinator) drives it.
///
/// One call, one resolution: the returned future resolves exactly
/// once, with either the server's confirmed room descriptor or the
/// reason the attempt failed.
pub trait RoomService: Send + Sync + 'static {
    /// Attempts to join `room`.
    fn join(
        &self,
        room: Arc<Room>,
    ) -> impl Future<Output = Result<Arc<Room>, JoinError>> + Send;
}
