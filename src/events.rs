//! Listener registry shared by every stateful participant (scene objects,
//! the viewer, the widget).
//!
//! Listeners receive the event by reference and nothing else. They cannot
//! reach the viewer's hover/press state, so a handler can never mutate the
//! state the dispatching evaluation is still reading.

use std::fmt;
use std::hash::Hash;

/// An event that can be routed by its kind.
pub trait Event {
    /// Fieldless discriminant listeners subscribe to.
    type Kind: Copy + Eq + Hash + fmt::Debug;

    /// This event's kind.
    fn kind(&self) -> Self::Kind;
}

/// Handle returned by [`Listeners::add`], used to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Callback<E> = Box<dyn FnMut(&E)>;

/// Ordered listener table. Dispatch visits listeners in registration order.
pub struct Listeners<E: Event> {
    next_id: u64,
    entries: Vec<(ListenerId, E::Kind, Callback<E>)>,
}

impl<E: Event> Listeners<E> {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Register `callback` for events of `kind`.
    pub fn add(
        &mut self,
        kind: E::Kind,
        callback: impl FnMut(&E) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, kind, Box::new(callback)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Invoke every listener registered for the event's kind. Returns how
    /// many listeners ran.
    pub fn dispatch(&mut self, event: &E) -> usize {
        let kind = event.kind();
        let mut invoked = 0;
        for (_, listener_kind, callback) in &mut self.entries {
            if *listener_kind == kind {
                callback(event);
                invoked += 1;
            }
        }
        invoked
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every listener.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<E: Event> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

/// Capability implemented by anything that accepts listeners.
pub trait EventTarget<E: Event> {
    /// The target's listener table.
    fn listeners_mut(&mut self) -> &mut Listeners<E>;

    /// Register a listener for `kind`.
    fn add_listener(
        &mut self,
        kind: E::Kind,
        callback: impl FnMut(&E) + 'static,
    ) -> ListenerId
    where
        Self: Sized,
    {
        self.listeners_mut().add(kind, callback)
    }

    /// Remove a listener previously returned by `add_listener`.
    fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners_mut().remove(id)
    }

    /// Deliver an event to this target's listeners.
    fn dispatch(&mut self, event: &E) -> usize {
        self.listeners_mut().dispatch(event)
    }
}
