//! Observable value slots for Vestibule.
//!
//! Lounge state is driven by value changes: the currently selected
//! room, whether the initial room fetch has completed. [`Observable`]
//! is the publish-subscribe primitive behind those signals: a typed
//! slot that notifies listeners synchronously, in subscription order,
//! every time the value is replaced.
//!
//! Handles are cheap to clone and share one underlying slot, so the
//! controller can hold the writing half while sibling components hold
//! reading/subscribing clones.
//!
//! # Dispatch rules
//!
//! Notification is synchronous: `set` returns only after every
//! listener has run, which is what keeps state mutation totally
//! ordered on the one logical UI thread. Subscribing or dropping a
//! [`Subscription`] from inside a callback takes effect after the
//! current dispatch finishes. A nested `set` from inside a callback
//! updates the value but is not re-dispatched.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

type Callback<T> = Box<dyn FnMut(&T) + Send>;

struct Listener<T> {
    id: u64,
    callback: Callback<T>,
}

struct Slot<T> {
    value: T,
    listeners: Vec<Listener<T>>,
    next_id: u64,
    /// True while a dispatch is walking the listener list. Mutations
    /// requested during dispatch are deferred until it finishes.
    dispatching: bool,
    /// Listener ids unsubscribed during an in-progress dispatch.
    retired: Vec<u64>,
}

/// A shared observable value slot.
///
/// Cloning an `Observable` clones the handle, not the value: all
/// clones read and write the same slot and share one listener list.
pub struct Observable<T> {
    slot: Arc<Mutex<Slot<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.lock().expect("observable slot lock poisoned");
        f.debug_struct("Observable")
            .field("value", &slot.value)
            .finish_non_exhaustive()
    }
}

impl<T: Clone + Send + 'static> Observable<T> {
    /// Creates a new slot holding `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot {
                value: initial,
                listeners: Vec::new(),
                next_id: 0,
                dispatching: false,
                retired: Vec::new(),
            })),
        }
    }

    /// Returns a clone of the current value.
    pub fn get(&self) -> T {
        self.lock().value.clone()
    }

    /// Replaces the value and notifies every listener with the new one.
    ///
    /// Listeners run synchronously, in subscription order. A nested
    /// `set` issued from inside a listener updates the stored value
    /// but does not start a second dispatch.
    pub fn set(&self, value: T) {
        let (snapshot, mut listeners) = {
            let mut slot = self.lock();
            slot.value = value;
            if slot.dispatching {
                tracing::trace!("nested set during dispatch, value updated without redispatch");
                return;
            }
            slot.dispatching = true;
            (slot.value.clone(), std::mem::take(&mut slot.listeners))
        };

        for listener in &mut listeners {
            (listener.callback)(&snapshot);
        }

        let mut slot = self.lock();
        slot.dispatching = false;
        // Listeners subscribed during dispatch landed in slot.listeners;
        // append them after the originals to preserve subscription order.
        let added = std::mem::take(&mut slot.listeners);
        listeners.extend(added);
        let retired = std::mem::take(&mut slot.retired);
        if !retired.is_empty() {
            listeners.retain(|l| !retired.contains(&l.id));
        }
        slot.listeners = listeners;
    }

    /// Registers a listener, returning a [`Subscription`] that detaches
    /// it on drop.
    ///
    /// With `fire_immediately`, the callback is invoked once with the
    /// current value before registration.
    pub fn subscribe(
        &self,
        fire_immediately: bool,
        mut callback: impl FnMut(&T) + Send + 'static,
    ) -> Subscription {
        if fire_immediately {
            let snapshot = self.get();
            callback(&snapshot);
        }

        let id = {
            let mut slot = self.lock();
            let id = slot.next_id;
            slot.next_id += 1;
            slot.listeners.push(Listener {
                id,
                callback: Box::new(callback),
            });
            id
        };

        let weak = Arc::downgrade(&self.slot);
        Subscription {
            cancel: Some(Box::new(move || unsubscribe(&weak, id))),
        }
    }

    /// Number of currently attached listeners.
    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot.lock().expect("observable slot lock poisoned")
    }
}

impl<T: Clone + Default + Send + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

fn unsubscribe<T>(slot: &Weak<Mutex<Slot<T>>>, id: u64) {
    let Some(slot) = slot.upgrade() else {
        return;
    };
    let mut slot = slot.lock().expect("observable slot lock poisoned");
    if slot.dispatching {
        // The listener list is out on loan to the dispatcher; mark the
        // id and let `set` drop it when the dispatch returns.
        slot.retired.push(id);
    } else {
        slot.listeners.retain(|l| l.id != id);
    }
}

/// Handle to a registered listener.
///
/// Dropping the subscription detaches the listener. Call [`detach`]
/// to keep the listener attached for the life of the observable
/// instead.
///
/// [`detach`]: Subscription::detach
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Consumes the subscription, leaving the listener attached
    /// permanently.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.cancel.is_some())
            .finish()
    }
}

// =========================================================================
// Tests
// =========================================================================
