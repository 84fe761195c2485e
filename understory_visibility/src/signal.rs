// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty flags shared between event listeners and the poll tick.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use crate::event::{EventHost, EventKind, Listener, ListenerCapability, ListenerKey};

bitflags::bitflags! {
    /// Pending triggers: which kinds of event arrived since the last tick.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Triggers: u8 {
        /// At least one scroll notification is pending.
        const SCROLL = 0b0000_0001;
        /// At least one resize notification is pending.
        const RESIZE = 0b0000_0010;
    }
}

impl From<EventKind> for Triggers {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Scroll => Self::SCROLL,
            EventKind::Resize => Self::RESIZE,
        }
    }
}

/// Scroll/resize dirty flags plus the most recent native event.
///
/// Listeners call [`mark`](Self::mark); the poll tick calls
/// [`take`](Self::take). Listeners never compute geometry or run user
/// callbacks, so a storm of events costs one flag write each.
///
/// A new signal starts with every trigger pending, so the first tick always
/// runs a visibility check.
#[derive(Debug)]
pub struct ChangeSignal<E> {
    pending: Cell<Triggers>,
    last_event: RefCell<Option<E>>,
}

impl<E: Clone> Default for ChangeSignal<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> ChangeSignal<E> {
    /// Creates a signal with every trigger pending and no event captured.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: Cell::new(Triggers::all()),
            last_event: RefCell::new(None),
        }
    }

    /// Records a notification of `kind` and captures `event`.
    pub fn mark(&self, kind: EventKind, event: &E) {
        let trigger = Triggers::from(kind);
        let pending = self.pending.get();
        if !pending.contains(trigger) {
            self.pending.set(pending | trigger);
        }
        *self.last_event.borrow_mut() = Some(event.clone());
    }

    /// Returns `true` if a notification of `kind` is pending.
    #[must_use]
    pub fn is_dirty(&self, kind: EventKind) -> bool {
        self.pending.get().contains(Triggers::from(kind))
    }

    /// The pending triggers, without clearing them.
    #[must_use]
    pub fn pending(&self) -> Triggers {
        self.pending.get()
    }

    /// Returns and clears the pending triggers.
    pub fn take(&self) -> Triggers {
        self.pending.replace(Triggers::empty())
    }

    /// Clears a single trigger, returning whether it was pending.
    pub fn take_one(&self, kind: EventKind) -> bool {
        let trigger = Triggers::from(kind);
        let pending = self.pending.get();
        self.pending.set(pending - trigger);
        pending.contains(trigger)
    }

    /// A clone of the most recently captured event.
    #[must_use]
    pub fn last_event(&self) -> Option<E> {
        self.last_event.borrow().clone()
    }
}

/// Which channels a monitor managed to subscribe to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Registration {
    /// A scroll listener is attached.
    pub scroll: bool,
    /// A resize listener is attached.
    pub resize: bool,
}

impl Registration {
    /// Both channels are attached.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.scroll && self.resize
    }

    /// Neither channel is attached; the monitor only sees its first tick.
    #[must_use]
    pub const fn is_silent(&self) -> bool {
        !self.scroll && !self.resize
    }
}

/// Subscribes `signal` to `kind` notifications using the probed capability.
///
/// The listener holds only a weak reference, so a host that outlives the
/// monitor invokes a no-op.
pub(crate) fn attach<H: EventHost>(
    host: &mut H,
    capability: ListenerCapability,
    kind: EventKind,
    signal: &Rc<ChangeSignal<H::Event>>,
) -> Option<ListenerKey> {
    let weak = Rc::downgrade(signal);
    let listener: Listener<H::Event> = Box::new(move |event: &H::Event| {
        if let Some(signal) = weak.upgrade() {
            signal.mark(kind, event);
        }
    });
    match capability {
        ListenerCapability::Modern => host.add_event_listener(kind, listener),
        ListenerCapability::Legacy => host.attach_event(kind.legacy_name(), listener),
        ListenerCapability::Unsupported => None,
    }
}
