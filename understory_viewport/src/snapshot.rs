// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A headless, mutable [`LayoutSurface`].

use alloc::string::{String, ToString};
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Rect, Size, Vec2};

use crate::surface::{LayoutSurface, NodeKind};

#[derive(Clone, Debug)]
struct NodeEntry {
    kind: NodeKind,
    bounds: Option<Rect>,
}

/// An in-memory layout surface keyed by node ids.
///
/// Useful for hosts that compute layout themselves (native shells, servers
/// rendering offscreen) and for tests. The caller updates the snapshot as
/// layout changes; queries always observe the latest values.
///
/// Unknown node ids report [`NodeKind::Other`] and no bounds.
///
/// ```
/// use kurbo::{Rect, Size};
/// use understory_viewport::{LayoutSnapshot, Target, in_viewport};
///
/// let mut layout = LayoutSnapshot::new(Size::new(800.0, 600.0));
/// layout.insert_element(1_u32, Rect::new(0.0, 900.0, 100.0, 1000.0));
/// assert!(!in_viewport(&layout, &Target::Node(1), 0.0));
///
/// // Scroll the element into view.
/// layout.set_bounds(1, Rect::new(0.0, 400.0, 100.0, 500.0));
/// assert!(in_viewport(&layout, &Target::Node(1), 0.0));
/// ```
#[derive(Clone, Debug)]
pub struct LayoutSnapshot<K> {
    client_size: Size,
    inner_size: Size,
    page_offset: Option<Vec2>,
    scroll_offset: Vec2,
    nodes: HashMap<K, NodeEntry>,
    media: Option<HashMap<String, bool>>,
}

impl<K: Copy + Eq + Hash> LayoutSnapshot<K> {
    /// Creates a snapshot whose client and inner sizes both equal `size`.
    ///
    /// The page offset starts at zero and media queries are unsupported until
    /// [`set_media`](Self::set_media) is called.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            client_size: size,
            inner_size: size,
            page_offset: Some(Vec2::ZERO),
            scroll_offset: Vec2::ZERO,
            nodes: HashMap::new(),
            media: None,
        }
    }

    /// Sets the document-element client size.
    pub fn set_client_size(&mut self, size: Size) {
        self.client_size = size;
    }

    /// Sets the window inner size.
    pub fn set_inner_size(&mut self, size: Size) {
        self.inner_size = size;
    }

    /// Sets both the client and inner size, as a window resize would.
    pub fn resize(&mut self, size: Size) {
        self.client_size = size;
        self.inner_size = size;
    }

    /// Sets the window page offset; `None` models a host without one.
    pub fn set_page_offset(&mut self, offset: Option<Vec2>) {
        self.page_offset = offset;
    }

    /// Sets the document-element scroll offset.
    pub fn set_scroll_offset(&mut self, offset: Vec2) {
        self.scroll_offset = offset;
    }

    /// Inserts (or replaces) an element with viewport-relative `bounds`.
    pub fn insert_element(&mut self, id: K, bounds: Rect) {
        self.insert_node(id, NodeKind::Element, Some(bounds));
    }

    /// Inserts (or replaces) a node of any kind.
    pub fn insert_node(&mut self, id: K, kind: NodeKind, bounds: Option<Rect>) {
        self.nodes.insert(id, NodeEntry { kind, bounds });
    }

    /// Updates the bounds of a known node. Returns `false` for unknown ids.
    pub fn set_bounds(&mut self, id: K, bounds: Rect) -> bool {
        match self.nodes.get_mut(&id) {
            Some(entry) => {
                entry.bounds = Some(bounds);
                true
            }
            None => false,
        }
    }

    /// Moves every node box by `-delta`, as scrolling the page by `delta` does
    /// to viewport-relative coordinates, and advances the page offset.
    pub fn scroll_by(&mut self, delta: Vec2) {
        for entry in self.nodes.values_mut() {
            if let Some(bounds) = entry.bounds.as_mut() {
                *bounds = *bounds - delta;
            }
        }
        let offset = self.page_offset.unwrap_or(self.scroll_offset) + delta;
        if self.page_offset.is_some() {
            self.page_offset = Some(offset);
        }
        self.scroll_offset = offset;
    }

    /// Detaches a node from layout: it keeps its kind but loses its box.
    pub fn detach(&mut self, id: K) {
        if let Some(entry) = self.nodes.get_mut(&id) {
            entry.bounds = None;
        }
    }

    /// Removes a node entirely.
    pub fn remove(&mut self, id: K) {
        self.nodes.remove(&id);
    }

    /// Records the result of a media query and enables media support.
    pub fn set_media(&mut self, query: &str, matches: bool) {
        self.media
            .get_or_insert_with(HashMap::new)
            .insert(query.to_string(), matches);
    }
}

impl<K: Copy + Eq + Hash> LayoutSurface for LayoutSnapshot<K> {
    type Node = K;

    fn client_size(&self) -> Size {
        self.client_size
    }

    fn inner_size(&self) -> Size {
        self.inner_size
    }

    fn page_offset(&self) -> Option<Vec2> {
        self.page_offset
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll_offset
    }

    fn node_kind(&self, node: &K) -> NodeKind {
        self.nodes.get(node).map_or(NodeKind::Other, |entry| entry.kind)
    }

    fn bounding_client_rect(&self, node: &K) -> Option<Rect> {
        self.nodes.get(node).and_then(|entry| entry.bounds)
    }

    fn match_media(&self, query: &str) -> Option<bool> {
        self.media
            .as_ref()
            .map(|media| media.get(query).copied().unwrap_or(false))
    }
}
