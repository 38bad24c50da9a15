//! The discovery seam: where room listings come from.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use vestibule_model::Room;

/// Errors the discovery source can produce.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// The source could not be reached.
    #[error("discovery source unavailable: {0}")]
    Unavailable(String),

    /// The source responded with something unparseable.
    #[error("malformed room listing: {0}")]
    Malformed(String),
}

/// Produces the current set of joinable rooms.
///
/// Vestibule does not implement room discovery itself. Implement
/// this trait over your matchmaking endpoint and hand it to
/// [`spawn_discovery`], or call the catalogue directly with whatever
/// snapshots your transport delivers.
pub trait DiscoverySource: Send + Sync + 'static {
    /// Fetches the source's current room snapshot.
    fn fetch_rooms(&self) -> impl Future<Output = Result<Vec<Room>, DiscoveryError>> + Send;
}

/// A discovery result delivered to the catalogue's owner.
#[derive(Debug)]
pub enum CatalogueEvent {
    /// A fresh snapshot of the known rooms.
    Batch(Vec<Room>),

    /// The refresh attempt failed; the previous snapshot stands.
    Failed(DiscoveryError),
}

/// Spawns a task polling `source` every `interval` and forwarding
/// each result onto `events`.
///
/// The task stops on its own when the receiving half is dropped.
pub fn spawn_discovery<D: DiscoverySource>(
    source: Arc<D>,
    interval: Duration,
    events: mpsc::UnboundedSender<CatalogueEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tracing::debug!(?interval, "discovery refresh task started");
        let mut ticker = tokio::time::interval(interval);

        loop {
            ticker.tick().await;

            let event = match source.fetch_rooms().await {
                Ok(batch) => CatalogueEvent::Batch(batch),
                Err(e) => {
                    tracing::warn!(error = %e, "room listing refresh failed");
                    CatalogueEvent::Failed(e)
                }
            };

            if events.send(event).is_err() {
                tracing::debug!("catalogue receiver gone, discovery task stopping");
                break;
            }
        }
    })
}

// =========================================================================
// Tests
// =========================================================================
