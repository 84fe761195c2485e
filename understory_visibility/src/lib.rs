// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_visibility --heading-base-level=0

//! Understory Visibility: polled, edge-triggered viewport visibility.
//!
//! A [`Watcher`] watches targets and calls an enter callback when a target
//! comes into the viewport and an exit callback when it leaves. It is built
//! from small parts:
//! - [`ChangeSignal`]: cheap scroll/resize dirty flags written by listeners.
//! - [`VisibilityState`]: the `Outside`/`Inside` state machine that turns
//!   repeated checks into [`Transition`]s.
//! - [`EventHost`]: how listeners are attached, with the
//!   [`ListenerCapability`] probed once per watcher.
//! - A poll timer per watch, from `understory_timing`, driven by
//!   [`Watcher::advance_to`].
//!
//! Listeners never compute geometry. They set a flag and remember the event.
//! Geometry is read at most once per watch per tick (see [`TriggerPolicy`]),
//! so bursts of scroll events cost one check.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::{cell::Cell, rc::Rc};
//!
//! use kurbo::{Rect, Size, Vec2};
//! use understory_viewport::{LayoutSnapshot, Target};
//! use understory_visibility::{
//!     EventKind, ListenerCapability, ListenerRegistry, Transition, WatchOptions, Watcher,
//! };
//!
//! let mut layout = LayoutSnapshot::new(Size::new(800.0, 600.0));
//! layout.insert_element(7_u32, Rect::new(0.0, 1000.0, 100.0, 1100.0));
//! let events = ListenerRegistry::<&'static str>::new(ListenerCapability::Modern);
//! let mut watcher = Watcher::new(layout, events);
//!
//! let entered = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&entered);
//! let options: WatchOptions<u32, &'static str> =
//!     WatchOptions::new(Target::Node(7)).on_enter(move |_, _| counter.set(counter.get() + 1));
//! let id = watcher.watch(options).unwrap();
//!
//! // The first tick always checks; the element is below the fold.
//! assert!(watcher.advance_to(150).is_empty());
//!
//! // Scroll it into view and tell the watcher about it.
//! watcher.layout_mut().scroll_by(Vec2::new(0.0, 600.0));
//! watcher.events_mut().dispatch(EventKind::Scroll, &"scroll");
//!
//! let fired = watcher.advance_to(300);
//! assert_eq!(fired.len(), 1);
//! assert_eq!(fired[0].id, id);
//! assert_eq!(fired[0].transition, Transition::Entered);
//! assert_eq!(entered.get(), 1);
//! ```
//!
//! ## Semantics
//!
//! - Every watch starts `Outside`. The first tick always checks, so a target
//!   that is already visible fires enter exactly once.
//! - Only changes fire callbacks: two consecutive "inside" checks produce one
//!   enter, never two.
//! - A target that loses its geometry (for example, it was detached) counts
//!   as outside.
//! - Callbacks receive the target and the last native event seen, or `None`
//!   before any event arrived.
//! - [`Watcher::unwatch`] and dropping the [`Watcher`] remove listeners and
//!   stop polling.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod event;
mod monitor;
mod options;
mod signal;
mod state;
mod watcher;

pub use error::WatchError;
pub use event::{EventHost, EventKind, Listener, ListenerCapability, ListenerKey, ListenerRegistry};
pub use options::{
    Callback, CallbackPair, Callbacks, DEFAULT_INTERVAL, TriggerPolicy, WatchOptions,
    WatchSettings,
};
pub use signal::{ChangeSignal, Registration, Triggers};
pub use state::{Transition, Visibility, VisibilityState};
pub use watcher::{TransitionRecord, WatchId, WatchStatus, Watcher};
