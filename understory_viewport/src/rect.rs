// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport dimensions and cushioned element rectangles.

use kurbo::{Rect, Size};

/// Viewport dimensions in CSS pixels.
///
/// A `Viewport` is a snapshot. It is derived from the layout surface each time
/// it is requested and is never cached by this crate.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Viewport {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport of the given dimensions.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    ///
    /// A zero height yields an infinite or NaN ratio, as plain division does.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

impl From<Viewport> for Size {
    fn from(viewport: Viewport) -> Self {
        Self::new(viewport.width, viewport.height)
    }
}

/// An element's bounding box after a symmetric cushion was applied.
///
/// `width` and `height` always equal `right - left` and `bottom - top` of the
/// adjusted edges.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Rectangle {
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Left edge.
    pub left: f64,
    /// `right - left`.
    pub width: f64,
    /// `bottom - top`.
    pub height: f64,
}

impl Rectangle {
    /// Width divided by height.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Converts back to a Kurbo rectangle with the same edges.
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.right, self.bottom)
    }
}

impl From<Rectangle> for Rect {
    fn from(rect: Rectangle) -> Self {
        rect.to_rect()
    }
}

/// Applies a symmetric `cushion` to a viewport-relative box.
///
/// Right and bottom edges move by `+cushion`, left and top edges by
/// `-cushion`, so a positive cushion grows the box and a negative one shrinks
/// it. The box is not normalized first: edges are taken as given.
///
/// ```
/// use kurbo::Rect;
/// use understory_viewport::calibrate;
///
/// let r = calibrate(Rect::new(10.0, 20.0, 30.0, 60.0), 5.0);
/// assert_eq!((r.left, r.top, r.right, r.bottom), (5.0, 15.0, 35.0, 65.0));
/// assert_eq!((r.width, r.height), (30.0, 50.0));
/// ```
#[must_use]
pub fn calibrate(rect: Rect, cushion: f64) -> Rectangle {
    let right = rect.x1 + cushion;
    let left = rect.x0 - cushion;
    let bottom = rect.y1 + cushion;
    let top = rect.y0 - cushion;
    Rectangle {
        top,
        right,
        bottom,
        left,
        width: right - left,
        height: bottom - top,
    }
}
