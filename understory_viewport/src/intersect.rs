// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport intersection tests.
//!
//! A missing rectangle (`None`) is never in the viewport. Absence of geometry
//! is absence of visibility, not an error.

use crate::geometry::{rectangle, viewport_height, viewport_width};
use crate::rect::Rectangle;
use crate::surface::{LayoutSurface, Target};

/// Whether `rect` overlaps the viewport's horizontal span `[0, viewport_width]`.
#[must_use]
pub fn intersects_x_axis(rect: Option<&Rectangle>, viewport_width: f64) -> bool {
    rect.is_some_and(|r| r.right >= 0.0 && r.left <= viewport_width)
}

/// Whether `rect` overlaps the viewport's vertical span `[0, viewport_height]`.
#[must_use]
pub fn intersects_y_axis(rect: Option<&Rectangle>, viewport_height: f64) -> bool {
    rect.is_some_and(|r| r.bottom >= 0.0 && r.top <= viewport_height)
}

/// Whether `rect` overlaps the viewport on both axes.
///
/// Touching edges count as overlapping.
#[must_use]
pub fn intersects_viewport(
    rect: Option<&Rectangle>,
    viewport_width: f64,
    viewport_height: f64,
) -> bool {
    rect.is_some_and(|r| {
        r.bottom >= 0.0 && r.right >= 0.0 && r.top <= viewport_height && r.left <= viewport_width
    })
}

/// Whether `target` is in the same horizontal section as the viewport.
#[must_use]
pub fn in_x<S: LayoutSurface + ?Sized>(surface: &S, target: &Target<S::Node>, cushion: f64) -> bool {
    let rect = rectangle(surface, target, cushion);
    intersects_x_axis(rect.as_ref(), viewport_width(surface))
}

/// Whether `target` is in the same vertical section as the viewport.
#[must_use]
pub fn in_y<S: LayoutSurface + ?Sized>(surface: &S, target: &Target<S::Node>, cushion: f64) -> bool {
    let rect = rectangle(surface, target, cushion);
    intersects_y_axis(rect.as_ref(), viewport_height(surface))
}

/// Whether `target` is in the viewport.
///
/// The rectangle is resolved once and tested on both axes.
#[must_use]
pub fn in_viewport<S: LayoutSurface + ?Sized>(
    surface: &S,
    target: &Target<S::Node>,
    cushion: f64,
) -> bool {
    let rect = rectangle(surface, target, cushion);
    intersects_viewport(
        rect.as_ref(),
        viewport_width(surface),
        viewport_height(surface),
    )
}
