// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-watch monitor: target, callbacks, signal, and state.

use alloc::rc::Rc;

use understory_timing::TimerId;
use understory_viewport::{LayoutSurface, Target, intersects_viewport, rectangle, viewport};

use crate::event::{EventKind, ListenerKey};
use crate::options::{CallbackPair, TriggerPolicy, WatchSettings};
use crate::signal::{ChangeSignal, Registration};
use crate::state::{Transition, VisibilityState};

#[derive(Debug)]
pub(crate) struct Monitor<N, E> {
    pub(crate) target: Target<N>,
    pub(crate) callbacks: CallbackPair<N, E>,
    pub(crate) signal: Rc<ChangeSignal<E>>,
    pub(crate) state: VisibilityState,
    pub(crate) settings: WatchSettings,
    pub(crate) timer: TimerId,
    pub(crate) scroll_listener: Option<ListenerKey>,
    pub(crate) resize_listener: Option<ListenerKey>,
    pub(crate) checks: u64,
}

impl<N: Clone, E: Clone> Monitor<N, E> {
    pub(crate) fn registration(&self) -> Registration {
        Registration {
            scroll: self.scroll_listener.is_some(),
            resize: self.resize_listener.is_some(),
        }
    }

    pub(crate) fn listener_keys(&self) -> impl Iterator<Item = ListenerKey> {
        self.scroll_listener.into_iter().chain(self.resize_listener)
    }

    /// Runs one poll tick.
    ///
    /// Consumes pending triggers and runs the transition check as the policy
    /// dictates. Returns the transition fired during this tick, if any.
    pub(crate) fn tick<L>(&mut self, layout: &L) -> Option<Transition>
    where
        L: LayoutSurface<Node = N> + ?Sized,
    {
        match self.settings.policy {
            TriggerPolicy::Coalesced => {
                if self.signal.take().is_empty() {
                    None
                } else {
                    self.check(layout)
                }
            }
            TriggerPolicy::PerTrigger => {
                let mut fired = None;
                for kind in EventKind::ALL {
                    if self.signal.take_one(kind) {
                        fired = self.check(layout).or(fired);
                    }
                }
                fired
            }
        }
    }

    fn check<L>(&mut self, layout: &L) -> Option<Transition>
    where
        L: LayoutSurface<Node = N> + ?Sized,
    {
        self.checks += 1;
        let rect = rectangle(layout, &self.target, self.settings.cushion);
        let vp = viewport(layout);
        let inside = intersects_viewport(rect.as_ref(), vp.width, vp.height);

        let transition = self.state.update(inside)?;
        // Cloned out so a callback that triggers host events can mark the
        // signal again without a `RefCell` conflict.
        let event = self.signal.last_event();
        let callback = match transition {
            Transition::Entered => &mut self.callbacks.on_enter,
            Transition::Exited => &mut self.callbacks.on_exit,
        };
        (*callback)(&self.target, event.as_ref());
        Some(transition)
    }
}
