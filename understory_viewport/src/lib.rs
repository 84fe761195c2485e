// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_viewport --heading-base-level=0

//! Understory Viewport: live viewport geometry and intersection tests.
//!
//! This crate answers "where is the viewport, and is this element in it?"
//! against a host-provided [`LayoutSurface`]. It provides:
//! - Viewport size ([`viewport_width`], [`viewport_height`], [`viewport`]).
//! - Scroll offsets with a fallback for hosts lacking a page offset
//!   ([`scroll_x`], [`scroll_y`]).
//! - Cushioned element rectangles ([`rectangle`], [`calibrate`]).
//! - Intersection tests over a rectangle snapshot ([`intersects_viewport`],
//!   [`intersects_x_axis`], [`intersects_y_axis`]) and convenience tests that
//!   resolve the rectangle for you ([`in_viewport`], [`in_x`], [`in_y`]).
//! - Aspect ratios and media-query checks ([`aspect`], [`media_matches`]).
//!
//! It does **not** perform layout, select elements, or observe anything over
//! time. Hosts implement [`LayoutSurface`] over whatever owns layout (a
//! browser binding, a native toolkit, or the headless [`LayoutSnapshot`]).
//! Polling and enter/exit callbacks live in `understory_visibility`.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_viewport::{LayoutSnapshot, Target, in_viewport, rectangle, viewport};
//!
//! let mut layout = LayoutSnapshot::new(Size::new(1024.0, 768.0));
//! layout.insert_element(1_u32, Rect::new(0.0, 780.0, 200.0, 900.0));
//!
//! assert_eq!(viewport(&layout).width, 1024.0);
//!
//! // Just below the fold...
//! assert!(!in_viewport(&layout, &Target::Node(1), 0.0));
//! // ...but within a 20px cushion.
//! assert!(in_viewport(&layout, &Target::Node(1), 20.0));
//!
//! let r = rectangle(&layout, &Target::Node(1), 20.0).unwrap();
//! assert_eq!(r.top, 760.0);
//! assert_eq!(r.width, r.right - r.left);
//! ```
//!
//! ## Semantics
//!
//! - Nothing is cached. Each call re-reads the surface.
//! - Targets resolve collections to their first entry; only element nodes
//!   have geometry.
//! - A target without geometry is simply not in the viewport.
//! - Touching the viewport edge counts as intersecting.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod geometry;
mod intersect;
mod rect;
mod snapshot;
mod surface;

pub use geometry::{
    aspect, media_matches, rectangle, scroll_x, scroll_y, viewport, viewport_height,
    viewport_width,
};
pub use intersect::{
    in_viewport, in_x, in_y, intersects_viewport, intersects_x_axis, intersects_y_axis,
};
pub use rect::{Rectangle, Viewport, calibrate};
pub use snapshot::LayoutSnapshot;
pub use surface::{LayoutSurface, NodeKind, Target};
