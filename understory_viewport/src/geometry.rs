// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live geometry queries over a [`LayoutSurface`].
//!
//! Every function re-reads the surface. Nothing is memoized, so a query made
//! right after a resize reflects the new layout.

use crate::rect::{Rectangle, Viewport, calibrate};
use crate::surface::{LayoutSurface, NodeKind, Target};

/// Viewport width: the larger of the document-element client width and the
/// window inner width.
///
/// Taking the maximum guards against layouts where one of the two excludes
/// the scrollbar gutter.
#[must_use]
pub fn viewport_width<S: LayoutSurface + ?Sized>(surface: &S) -> f64 {
    let client = surface.client_size().width;
    let inner = surface.inner_size().width;
    if client < inner { inner } else { client }
}

/// Viewport height: the larger of the document-element client height and the
/// window inner height.
#[must_use]
pub fn viewport_height<S: LayoutSurface + ?Sized>(surface: &S) -> f64 {
    let client = surface.client_size().height;
    let inner = surface.inner_size().height;
    if client < inner { inner } else { client }
}

/// Both viewport dimensions.
#[must_use]
pub fn viewport<S: LayoutSurface + ?Sized>(surface: &S) -> Viewport {
    Viewport::new(viewport_width(surface), viewport_height(surface))
}

/// Horizontal scroll offset.
///
/// Uses the window page offset, falling back to the document-element scroll
/// offset when the page offset is unavailable or zero.
#[must_use]
pub fn scroll_x<S: LayoutSurface + ?Sized>(surface: &S) -> f64 {
    match surface.page_offset() {
        Some(offset) if offset.x != 0.0 => offset.x,
        _ => surface.scroll_offset().x,
    }
}

/// Vertical scroll offset, with the same fallback as [`scroll_x`].
#[must_use]
pub fn scroll_y<S: LayoutSurface + ?Sized>(surface: &S) -> f64 {
    match surface.page_offset() {
        Some(offset) if offset.y != 0.0 => offset.y,
        _ => surface.scroll_offset().y,
    }
}

/// The cushioned bounding rectangle of `target`.
///
/// Collections resolve to their first entry. Returns `None` when the target
/// resolves to nothing, to a node that is not an element, or to an element
/// without a box.
#[must_use]
pub fn rectangle<S: LayoutSurface + ?Sized>(
    surface: &S,
    target: &Target<S::Node>,
    cushion: f64,
) -> Option<Rectangle> {
    let node = target.resolve()?;
    if surface.node_kind(node) != NodeKind::Element {
        return None;
    }
    surface
        .bounding_client_rect(node)
        .map(|rect| calibrate(rect, cushion))
}

/// Aspect ratio (width / height) of `target`, or of the viewport when
/// `target` is `None`.
///
/// Returns `None` when a target is given but has no geometry.
#[must_use]
pub fn aspect<S: LayoutSurface + ?Sized>(
    surface: &S,
    target: Option<&Target<S::Node>>,
) -> Option<f64> {
    match target {
        None => Some(viewport(surface).aspect()),
        Some(target) => rectangle(surface, target, 0.0).map(|r| r.aspect()),
    }
}

/// Tests whether a media query is active.
///
/// Hosts without media-query support report `false` for every query.
#[must_use]
pub fn media_matches<S: LayoutSurface + ?Sized>(surface: &S, query: &str) -> bool {
    surface.match_media(query).unwrap_or(false)
}
