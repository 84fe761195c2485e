// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Watch configuration: target, callback shapes, and polling settings.

use alloc::boxed::Box;
use core::fmt;

use understory_viewport::Target;

/// Polling period used when none (or zero) is configured, in milliseconds.
pub const DEFAULT_INTERVAL: u64 = 150;

/// A visibility callback.
///
/// Called with the watched target and the most recently captured event, if
/// any event has arrived yet.
pub type Callback<N, E> = Box<dyn FnMut(&Target<N>, Option<&E>)>;

/// The shapes in which callbacks can be supplied.
pub enum Callbacks<N, E> {
    /// One function, called on enter only.
    Single(Callback<N, E>),
    /// An ordered `(enter, exit)` pair.
    Pair(Callback<N, E>, Callback<N, E>),
    /// Named enter and exit functions; either may be left out.
    Named {
        /// Called on enter.
        enter: Option<Callback<N, E>>,
        /// Called on exit.
        exit: Option<Callback<N, E>>,
    },
}

impl<N, E> Callbacks<N, E> {
    /// Resolves any shape into an enter/exit pair, filling gaps with no-ops.
    #[must_use]
    pub fn resolve(self) -> CallbackPair<N, E> {
        let (enter, exit) = self.into_parts();
        CallbackPair {
            on_enter: enter.unwrap_or_else(noop),
            on_exit: exit.unwrap_or_else(noop),
        }
    }

    fn into_parts(self) -> (Option<Callback<N, E>>, Option<Callback<N, E>>) {
        match self {
            Self::Single(enter) => (Some(enter), None),
            Self::Pair(enter, exit) => (Some(enter), Some(exit)),
            Self::Named { enter, exit } => (enter, exit),
        }
    }
}

impl<N, E> fmt::Debug for Callbacks<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(_) => f.write_str("Callbacks::Single"),
            Self::Pair(..) => f.write_str("Callbacks::Pair"),
            Self::Named { enter, exit } => f
                .debug_struct("Callbacks::Named")
                .field("enter", &enter.is_some())
                .field("exit", &exit.is_some())
                .finish(),
        }
    }
}

fn noop<N, E>() -> Callback<N, E> {
    Box::new(|_: &Target<N>, _: Option<&E>| {})
}

/// Resolved enter and exit callbacks.
pub struct CallbackPair<N, E> {
    /// Called on `Outside` → `Inside`.
    pub on_enter: Callback<N, E>,
    /// Called on `Inside` → `Outside`.
    pub on_exit: Callback<N, E>,
}

impl<N, E> Default for CallbackPair<N, E> {
    fn default() -> Self {
        Self {
            on_enter: noop(),
            on_exit: noop(),
        }
    }
}

impl<N, E> fmt::Debug for CallbackPair<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackPair").finish_non_exhaustive()
    }
}

/// How pending triggers map to visibility checks within one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum TriggerPolicy {
    /// At most one check per tick, however many triggers are pending.
    #[default]
    Coalesced,
    /// One check per pending trigger, scroll before resize.
    ///
    /// The state machine makes the second check a no-op; this only changes
    /// how often geometry is read.
    PerTrigger,
}

/// Plain polling settings for a watch.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WatchSettings {
    /// Polling period in milliseconds. `None` or `Some(0)` means
    /// [`DEFAULT_INTERVAL`].
    pub interval: Option<u64>,
    /// Signed pixel margin applied to the target rectangle before testing.
    pub cushion: f64,
    /// Trigger handling within a tick.
    pub policy: TriggerPolicy,
}

impl WatchSettings {
    /// The polling period actually used.
    #[must_use]
    pub fn effective_interval(&self) -> u64 {
        match self.interval {
            Some(ms) if ms > 0 => ms,
            _ => DEFAULT_INTERVAL,
        }
    }
}

/// Everything needed to start watching a target.
///
/// ```
/// use understory_visibility::{Callbacks, WatchOptions};
/// use understory_viewport::Target;
///
/// let options: WatchOptions<u32, ()> = WatchOptions::new(Target::Node(3))
///     .on_enter(|_, _| {})
///     .interval(250)
///     .cushion(40.0);
/// assert_eq!(options.settings.effective_interval(), 250);
/// assert!(matches!(options.callbacks, Some(Callbacks::Named { .. })));
/// ```
pub struct WatchOptions<N, E> {
    /// The target to watch. Required.
    pub target: Option<Target<N>>,
    /// Callbacks; `None` means no-ops for both.
    pub callbacks: Option<Callbacks<N, E>>,
    /// Polling settings.
    pub settings: WatchSettings,
}

impl<N, E> Default for WatchOptions<N, E> {
    fn default() -> Self {
        Self {
            target: None,
            callbacks: None,
            settings: WatchSettings::default(),
        }
    }
}

impl<N: fmt::Debug, E> fmt::Debug for WatchOptions<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchOptions")
            .field("target", &self.target)
            .field("callbacks", &self.callbacks)
            .field("settings", &self.settings)
            .finish()
    }
}

impl<N, E> WatchOptions<N, E> {
    /// Options for `target` with no-op callbacks and default settings.
    #[must_use]
    pub fn new(target: Target<N>) -> Self {
        Self {
            target: Some(target),
            ..Self::default()
        }
    }

    /// Replaces the callbacks with the given shape.
    #[must_use]
    pub fn callbacks(mut self, callbacks: Callbacks<N, E>) -> Self {
        self.callbacks = Some(callbacks);
        self
    }

    /// Sets the enter callback, keeping any exit callback.
    #[must_use]
    pub fn on_enter(mut self, f: impl FnMut(&Target<N>, Option<&E>) + 'static) -> Self {
        let (_, exit) = self.take_parts();
        self.callbacks = Some(Callbacks::Named {
            enter: Some(Box::new(f)),
            exit,
        });
        self
    }

    /// Sets the exit callback, keeping any enter callback.
    #[must_use]
    pub fn on_exit(mut self, f: impl FnMut(&Target<N>, Option<&E>) + 'static) -> Self {
        let (enter, _) = self.take_parts();
        self.callbacks = Some(Callbacks::Named {
            enter,
            exit: Some(Box::new(f)),
        });
        self
    }

    /// Sets the polling period in milliseconds (`0` means the default).
    #[must_use]
    pub fn interval(mut self, ms: u64) -> Self {
        self.settings.interval = Some(ms);
        self
    }

    /// Sets the cushion applied to the target rectangle.
    #[must_use]
    pub fn cushion(mut self, cushion: f64) -> Self {
        self.settings.cushion = cushion;
        self
    }

    /// Sets the trigger policy.
    #[must_use]
    pub fn policy(mut self, policy: TriggerPolicy) -> Self {
        self.settings.policy = policy;
        self
    }

    /// Replaces all polling settings at once.
    #[must_use]
    pub fn settings(mut self, settings: WatchSettings) -> Self {
        self.settings = settings;
        self
    }

    fn take_parts(&mut self) -> (Option<Callback<N, E>>, Option<Callback<N, E>>) {
        self.callbacks
            .take()
            .map_or((None, None), Callbacks::into_parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn record(log: &Log, tag: &'static str) -> Callback<u32, ()> {
        let log = Rc::clone(log);
        Box::new(move |_: &Target<u32>, _: Option<&()>| log.borrow_mut().push(tag))
    }

    fn fire(pair: &mut CallbackPair<u32, ()>) {
        let target = Target::Node(1);
        (pair.on_enter)(&target, None);
        (pair.on_exit)(&target, None);
    }

    #[test]
    fn single_callback_is_enter_only() {
        let log = Log::default();
        let mut pair = Callbacks::Single(record(&log, "enter")).resolve();
        fire(&mut pair);
        assert_eq!(*log.borrow(), ["enter"]);
    }

    #[test]
    fn pair_is_ordered_enter_then_exit() {
        let log = Log::default();
        let mut pair = Callbacks::Pair(record(&log, "enter"), record(&log, "exit")).resolve();
        fire(&mut pair);
        assert_eq!(*log.borrow(), ["enter", "exit"]);
    }

    #[test]
    fn named_fills_gaps_with_noops() {
        let log = Log::default();
        let mut pair = Callbacks::Named {
            enter: None,
            exit: Some(record(&log, "exit")),
        }
        .resolve();
        fire(&mut pair);
        assert_eq!(*log.borrow(), ["exit"]);
    }

    #[test]
    fn builder_merges_enter_and_exit() {
        let log = Log::default();
        let enter_log = Rc::clone(&log);
        let exit_log = Rc::clone(&log);
        let options: WatchOptions<u32, ()> = WatchOptions::new(Target::Node(1))
            .callbacks(Callbacks::Single(record(&log, "replaced")))
            .on_enter(move |_, _| enter_log.borrow_mut().push("enter"))
            .on_exit(move |_, _| exit_log.borrow_mut().push("exit"));

        let mut pair = options.callbacks.unwrap().resolve();
        fire(&mut pair);
        assert_eq!(*log.borrow(), ["enter", "exit"]);
    }

    #[test]
    fn falsy_interval_uses_default() {
        let mut settings = WatchSettings::default();
        assert_eq!(settings.effective_interval(), DEFAULT_INTERVAL);
        settings.interval = Some(0);
        assert_eq!(settings.effective_interval(), DEFAULT_INTERVAL);
        settings.interval = Some(40);
        assert_eq!(settings.effective_interval(), 40);
    }
}
