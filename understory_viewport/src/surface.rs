// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-facing layout query surface and target resolution.

use alloc::vec::Vec;

use kurbo::{Rect, Size, Vec2};

/// The type of a node handle, as reported by the host.
///
/// Only [`NodeKind::Element`] nodes carry geometry. Every other kind resolves
/// to "no rectangle".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// An element node.
    Element,
    /// A text node.
    Text,
    /// A comment node.
    Comment,
    /// The document node itself.
    Document,
    /// Anything else the host exposes as a node.
    Other,
}

/// A DOM-like layout query surface.
///
/// Implementations answer questions about the *current* layout. Nothing in
/// this crate caches the answers; every geometry query goes back to the
/// surface, so a surface must always report live values.
///
/// Node handles are cheap, caller-owned references (an index, a generational
/// id, a JS object handle). The surface never takes ownership of the node.
pub trait LayoutSurface {
    /// Handle type for nodes known to this surface.
    type Node: Clone;

    /// Client width and height of the document element.
    ///
    /// Some layouts exclude the scrollbar gutter from this value.
    fn client_size(&self) -> Size;

    /// Inner width and height of the window.
    fn inner_size(&self) -> Size;

    /// The window page offset, if the host exposes one.
    fn page_offset(&self) -> Option<Vec2>;

    /// Scroll offset (left, top) of the document element.
    fn scroll_offset(&self) -> Vec2;

    /// Reports the kind of `node`.
    fn node_kind(&self, node: &Self::Node) -> NodeKind;

    /// The bounding box of `node` in viewport-relative coordinates.
    ///
    /// Returns `None` when the node has no box, for example after it was
    /// detached from the document.
    fn bounding_client_rect(&self, node: &Self::Node) -> Option<Rect>;

    /// Evaluates a media query.
    ///
    /// Returns `None` when the host has no media-query capability. The
    /// default implementation reports no capability.
    fn match_media(&self, query: &str) -> Option<bool> {
        let _ = query;
        None
    }
}

/// A target for geometry queries: a single node, or a collection-like input.
///
/// Collections resolve to their first entry, mirroring how array-like
/// selections are treated by most DOM helpers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target<N> {
    /// Exactly one node.
    Node(N),
    /// A collection whose first entry is the effective target.
    Collection(Vec<N>),
}

impl<N> Target<N> {
    /// Builds a collection target from any iterator of node handles.
    pub fn collection(nodes: impl IntoIterator<Item = N>) -> Self {
        Self::Collection(nodes.into_iter().collect())
    }

    /// Returns the node this target resolves to, if any.
    ///
    /// An empty collection resolves to `None`.
    #[must_use]
    pub fn resolve(&self) -> Option<&N> {
        match self {
            Self::Node(node) => Some(node),
            Self::Collection(nodes) => nodes.first(),
        }
    }
}
