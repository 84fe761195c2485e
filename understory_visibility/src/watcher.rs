// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The watch entry point: owns hosts, timers, and monitors.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use understory_timing::TimerQueue;
use understory_viewport::{LayoutSurface, NodeKind, Target};

use crate::error::WatchError;
use crate::event::{EventHost, EventKind, ListenerCapability};
use crate::monitor::Monitor;
use crate::options::WatchOptions;
use crate::signal::{ChangeSignal, Registration, Triggers, attach};
use crate::state::{Transition, Visibility, VisibilityState};

/// Handle for an active watch.
///
/// Ids are never reused by a given [`Watcher`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WatchId(u64);

/// A transition fired by [`Watcher::advance_to`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransitionRecord {
    /// The watch whose callback ran.
    pub id: WatchId,
    /// Which callback ran.
    pub transition: Transition,
    /// The tick time (the timer deadline, not the pump time).
    pub at: u64,
}

/// Diagnostic snapshot of one watch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WatchStatus {
    /// Current visibility.
    pub visibility: Visibility,
    /// Which listeners were attached.
    pub registration: Registration,
    /// Triggers not yet consumed by a tick.
    pub pending: Triggers,
    /// Effective polling period.
    pub interval: u64,
    /// Number of visibility checks run so far.
    pub checks: u64,
}

/// Polls watched targets and fires enter/exit callbacks on transitions.
///
/// A `Watcher` owns the host's [`LayoutSurface`] and [`EventHost`], a timer
/// queue, and every active monitor. The listener capability is probed once,
/// here, and used for every watch.
///
/// Time is driven by the host: call [`advance_to`](Self::advance_to) with the
/// current time in milliseconds from the host's event loop. Ticks due by then
/// run one after another, in deadline order; no tick ever overlaps another.
///
/// Dropping the `Watcher` removes every listener it registered.
pub struct Watcher<L: LayoutSurface, H: EventHost> {
    layout: L,
    events: H,
    capability: ListenerCapability,
    timers: TimerQueue<WatchId>,
    monitors: HashMap<WatchId, Monitor<L::Node, H::Event>>,
    next_id: u64,
    now: u64,
}

impl<L, H> fmt::Debug for Watcher<L, H>
where
    L: LayoutSurface + fmt::Debug,
    H: EventHost + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watcher")
            .field("layout", &self.layout)
            .field("events", &self.events)
            .field("capability", &self.capability)
            .field("watches", &self.monitors.len())
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

impl<L: LayoutSurface, H: EventHost> Watcher<L, H> {
    /// Creates a watcher over the given hosts, with the clock at zero.
    pub fn new(layout: L, events: H) -> Self {
        let capability = events.listener_capability();
        tracing::debug!(?capability, "probed listener capability");
        Self {
            layout,
            events,
            capability,
            timers: TimerQueue::new(),
            monitors: HashMap::new(),
            next_id: 0,
            now: 0,
        }
    }

    /// The listener capability probed at construction.
    #[must_use]
    pub fn capability(&self) -> ListenerCapability {
        self.capability
    }

    /// The layout surface.
    #[must_use]
    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Mutable access to the layout surface, for hosts that own layout.
    pub fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }

    /// The event host.
    #[must_use]
    pub fn events(&self) -> &H {
        &self.events
    }

    /// Mutable access to the event host, for forwarding notifications.
    pub fn events_mut(&mut self) -> &mut H {
        &mut self.events
    }

    /// The latest time passed to [`advance_to`](Self::advance_to).
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Starts watching a target.
    ///
    /// The target must be present, and a single-node target must be an
    /// element; otherwise nothing is registered and an error describes why.
    /// Collection targets are accepted as they are and resolved on every tick.
    ///
    /// The first tick runs one interval after the current time and always
    /// checks visibility.
    pub fn watch(
        &mut self,
        options: WatchOptions<L::Node, H::Event>,
    ) -> Result<WatchId, WatchError> {
        let WatchOptions {
            target,
            callbacks,
            settings,
        } = options;

        let Some(target) = target else {
            tracing::debug!("watch ignored: no target");
            return Err(WatchError::MissingTarget);
        };
        if let Target::Node(node) = &target {
            let kind = self.layout.node_kind(node);
            if kind != NodeKind::Element {
                tracing::debug!(?kind, "watch ignored: target is not an element");
                return Err(WatchError::NotAnElement(kind));
            }
        }

        let id = WatchId(self.next_id);
        self.next_id += 1;

        let signal = Rc::new(ChangeSignal::new());
        let scroll_listener = attach(&mut self.events, self.capability, EventKind::Scroll, &signal);
        let resize_listener = attach(&mut self.events, self.capability, EventKind::Resize, &signal);
        let interval = settings.effective_interval();
        let timer = self.timers.schedule_interval(self.now, interval, id);

        let monitor = Monitor {
            target,
            callbacks: callbacks.map(|c| c.resolve()).unwrap_or_default(),
            signal,
            state: VisibilityState::new(),
            settings,
            timer,
            scroll_listener,
            resize_listener,
            checks: 0,
        };
        let registration = monitor.registration();
        if registration.is_silent() {
            tracing::debug!(watch = id.0, "no listeners attached; target is checked once");
        }
        tracing::debug!(
            watch = id.0,
            interval,
            scroll = registration.scroll,
            resize = registration.resize,
            "watch started"
        );
        self.monitors.insert(id, monitor);
        Ok(id)
    }

    /// Stops a watch: cancels its poll timer, removes its listeners, and drops
    /// its callbacks.
    ///
    /// Returns `false` if `id` is not active.
    pub fn unwatch(&mut self, id: WatchId) -> bool {
        let Some(monitor) = self.monitors.remove(&id) else {
            return false;
        };
        self.timers.cancel(monitor.timer);
        for key in monitor.listener_keys() {
            self.events.remove_listener(key);
        }
        tracing::debug!(watch = id.0, "watch stopped");
        true
    }

    /// Returns `true` if `id` is active.
    #[must_use]
    pub fn is_watching(&self, id: WatchId) -> bool {
        self.monitors.contains_key(&id)
    }

    /// Number of active watches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if nothing is being watched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// Diagnostic snapshot of a watch.
    #[must_use]
    pub fn status(&self, id: WatchId) -> Option<WatchStatus> {
        let monitor = self.monitors.get(&id)?;
        Some(WatchStatus {
            visibility: monitor.state.visibility(),
            registration: monitor.registration(),
            pending: monitor.signal.pending(),
            interval: monitor.settings.effective_interval(),
            checks: monitor.checks,
        })
    }

    /// Which listeners a watch managed to attach.
    #[must_use]
    pub fn registration(&self, id: WatchId) -> Option<Registration> {
        self.monitors.get(&id).map(Monitor::registration)
    }

    /// Returns `true` if the watch is active and its target was inside the
    /// viewport as of its last check.
    #[must_use]
    pub fn is_inside(&self, id: WatchId) -> bool {
        self.monitors
            .get(&id)
            .is_some_and(|monitor| monitor.state.is_inside())
    }

    /// When the next tick is due, if anything is being watched.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Advances the clock to `now` and runs every tick due by then.
    ///
    /// Time never moves backwards: an earlier `now` is treated as the current
    /// time. Each watch ticks at most once per call, however long the gap
    /// since the previous call; missed ticks are skipped, not replayed. The
    /// clock starts at zero, so a host may pass any monotonic time base.
    /// Returns the transitions fired, in the order their callbacks ran.
    pub fn advance_to(&mut self, now: u64) -> Vec<TransitionRecord> {
        self.now = self.now.max(now);
        let mut fired = Vec::new();
        while let Some(expired) = self.timers.pop_due(self.now) {
            let id = expired.payload;
            let Some(monitor) = self.monitors.get_mut(&id) else {
                continue;
            };
            tracing::trace!(watch = id.0, at = expired.deadline, "poll tick");
            if let Some(transition) = monitor.tick(&self.layout) {
                tracing::debug!(watch = id.0, ?transition, at = expired.deadline, "visibility changed");
                fired.push(TransitionRecord {
                    id,
                    transition,
                    at: expired.deadline,
                });
            }
        }
        fired
    }
}

impl<L: LayoutSurface, H: EventHost> Drop for Watcher<L, H> {
    fn drop(&mut self) {
        for monitor in self.monitors.values() {
            for key in monitor.listener_keys() {
                self.events.remove_listener(key);
            }
        }
    }
}
