// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event-registration surface: capabilities, listener keys, and a
//! headless registry.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// The viewport notifications a monitor subscribes to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The viewport scrolled.
    Scroll,
    /// The viewport was resized.
    Resize,
}

impl EventKind {
    /// Both kinds, in the order monitors register them.
    pub const ALL: [Self; 2] = [Self::Scroll, Self::Resize];

    /// Standard event name (`"scroll"`, `"resize"`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::Resize => "resize",
        }
    }

    /// Legacy handler name (`"onscroll"`, `"onresize"`).
    #[must_use]
    pub const fn legacy_name(self) -> &'static str {
        match self {
            Self::Scroll => "onscroll",
            Self::Resize => "onresize",
        }
    }

    /// Parses a legacy handler name.
    #[must_use]
    pub fn from_legacy_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.legacy_name() == name)
    }
}

/// Which listener attachment style an [`EventHost`] supports.
///
/// Probed once, when a [`Watcher`](crate::Watcher) is created.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerCapability {
    /// Standards-based `add_event_listener(kind, ..)`.
    Modern,
    /// Legacy `attach_event("on" + kind, ..)`.
    Legacy,
    /// No listener registration at all; monitors never see events.
    Unsupported,
}

/// Host-issued handle for a registered listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerKey(u64);

impl ListenerKey {
    /// Wraps a host-specific raw key.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw key.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A boxed listener. Receives the native event for each notification.
pub type Listener<E> = Box<dyn FnMut(&E)>;

/// A host that can deliver scroll and resize notifications.
///
/// Hosts implement the registration method matching their
/// [`capability`](Self::listener_capability); the other one keeps its
/// default, which registers nothing.
pub trait EventHost {
    /// Native event type forwarded to callbacks.
    type Event: Clone + 'static;

    /// The attachment style this host supports.
    fn listener_capability(&self) -> ListenerCapability;

    /// Registers `listener` for `kind` notifications.
    ///
    /// Returns `None` if the listener could not be registered.
    fn add_event_listener(
        &mut self,
        kind: EventKind,
        listener: Listener<Self::Event>,
    ) -> Option<ListenerKey> {
        let _ = (kind, listener);
        None
    }

    /// Registers `listener` under a legacy handler name such as `"onscroll"`.
    ///
    /// Returns `None` if the listener could not be registered.
    fn attach_event(&mut self, name: &str, listener: Listener<Self::Event>) -> Option<ListenerKey> {
        let _ = (name, listener);
        None
    }

    /// Removes a previously registered listener. Unknown keys are ignored.
    fn remove_listener(&mut self, key: ListenerKey);
}

struct Entry<E> {
    key: ListenerKey,
    kind: EventKind,
    listener: Listener<E>,
}

/// A headless [`EventHost`] that stores listeners and invokes them on
/// [`dispatch`](Self::dispatch).
///
/// Hosts that receive scroll and resize notifications from their own event
/// loop (a windowing shell, an embedder) forward them here. The capability is
/// fixed at construction: a `Legacy` registry only accepts
/// [`attach_event`](EventHost::attach_event) registrations, a `Modern` one only
/// [`add_event_listener`](EventHost::add_event_listener), and an
/// `Unsupported` one accepts neither.
pub struct ListenerRegistry<E> {
    capability: ListenerCapability,
    entries: Vec<Entry<E>>,
    next_key: u64,
}

impl<E> fmt::Debug for ListenerRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("capability", &self.capability)
            .field("listeners", &self.entries.len())
            .field("next_key", &self.next_key)
            .finish()
    }
}

impl<E> Default for ListenerRegistry<E> {
    fn default() -> Self {
        Self::new(ListenerCapability::Modern)
    }
}

impl<E> ListenerRegistry<E> {
    /// Creates an empty registry with the given capability.
    #[must_use]
    pub fn new(capability: ListenerCapability) -> Self {
        Self {
            capability,
            entries: Vec::new(),
            next_key: 0,
        }
    }

    /// Invokes every listener registered for `kind`, in registration order.
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch(&mut self, kind: EventKind, event: &E) -> usize {
        let mut invoked = 0;
        for entry in self.entries.iter_mut().filter(|entry| entry.kind == kind) {
            (entry.listener)(event);
            invoked += 1;
        }
        invoked
    }

    /// Number of listeners registered for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.entries.iter().filter(|entry| entry.kind == kind).count()
    }

    /// Total number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, kind: EventKind, listener: Listener<E>) -> ListenerKey {
        let key = ListenerKey::new(self.next_key);
        self.next_key += 1;
        self.entries.push(Entry {
            key,
            kind,
            listener,
        });
        key
    }
}

impl<E: Clone + 'static> EventHost for ListenerRegistry<E> {
    type Event = E;

    fn listener_capability(&self) -> ListenerCapability {
        self.capability
    }

    fn add_event_listener(&mut self, kind: EventKind, listener: Listener<E>) -> Option<ListenerKey> {
        (self.capability == ListenerCapability::Modern).then(|| self.push(kind, listener))
    }

    fn attach_event(&mut self, name: &str, listener: Listener<E>) -> Option<ListenerKey> {
        if self.capability != ListenerCapability::Legacy {
            return None;
        }
        let kind = EventKind::from_legacy_name(name)?;
        Some(self.push(kind, listener))
    }

    fn remove_listener(&mut self, key: ListenerKey) {
        self.entries.retain(|entry| entry.key != key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;

    fn counter(hits: &Rc<Cell<u32>>) -> Listener<u32> {
        let hits = Rc::clone(hits);
        Box::new(move |event: &u32| hits.set(hits.get() + event))
    }

    #[test]
    fn legacy_names_round_trip() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_legacy_name(kind.legacy_name()), Some(kind));
        }
        assert_eq!(EventKind::from_legacy_name("scroll"), None);
        assert_eq!(EventKind::from_legacy_name("onclick"), None);
    }

    #[test]
    fn modern_registry_dispatches_by_kind() {
        let hits = Rc::new(Cell::new(0));
        let mut registry = ListenerRegistry::new(ListenerCapability::Modern);
        registry.add_event_listener(EventKind::Scroll, counter(&hits));

        assert_eq!(registry.dispatch(EventKind::Resize, &10), 0);
        assert_eq!(registry.dispatch(EventKind::Scroll, &3), 1);
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn registry_only_accepts_its_capability() {
        let hits = Rc::new(Cell::new(0));

        let mut modern = ListenerRegistry::new(ListenerCapability::Modern);
        assert!(modern.attach_event("onscroll", counter(&hits)).is_none());

        let mut legacy = ListenerRegistry::new(ListenerCapability::Legacy);
        assert!(legacy.add_event_listener(EventKind::Scroll, counter(&hits)).is_none());
        assert!(legacy.attach_event("onscroll", counter(&hits)).is_some());
        assert!(legacy.attach_event("onwheel", counter(&hits)).is_none());
        assert_eq!(legacy.listener_count(EventKind::Scroll), 1);

        let mut none = ListenerRegistry::new(ListenerCapability::Unsupported);
        assert!(none.add_event_listener(EventKind::Resize, counter(&hits)).is_none());
        assert!(none.attach_event("onresize", counter(&hits)).is_none());
        assert!(none.is_empty());
    }

    #[test]
    fn removed_listeners_stop_firing() {
        let hits = Rc::new(Cell::new(0));
        let mut registry = ListenerRegistry::new(ListenerCapability::Modern);
        let key = registry
            .add_event_listener(EventKind::Resize, counter(&hits))
            .unwrap();
        registry.remove_listener(key);
        registry.remove_listener(key);

        assert_eq!(registry.dispatch(EventKind::Resize, &1), 0);
        assert_eq!(hits.get(), 0);
        assert!(registry.is_empty());
    }
}
