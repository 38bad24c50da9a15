//! Room catalogue for Vestibule.
//!
//! The catalogue mirrors an external discovery source: the ordered
//! set of currently known rooms, narrowed by a filter, plus the
//! "has the initial fetch completed" readiness signal the lounge's
//! loading indicator hangs off.
//!
//! # Key types
//!
//! - [`RoomCatalogue`] — the known-room set and its filtered view
//! - [`RoomFilter`] — criteria narrowing the view
//! - [`DiscoverySource`] — the trait host applications implement
//! - [`spawn_discovery`] — periodic refresh task feeding [`CatalogueEvent`]s

mod catalogue;
mod discovery;
mod filter;

pub use catalogue::RoomCatalogue;
pub use discovery::{CatalogueEvent, DiscoveryError, DiscoverySource, spawn_discovery};
pub use filter::RoomFilter;
