// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `understory_viewport` against a hand-written host surface.
//!
//! The host below mimics an older layout engine: no page offset, no media
//! queries, and a client width that excludes a 15px scrollbar gutter.

use kurbo::{Rect, Size, Vec2};
use understory_viewport::{
    LayoutSurface, NodeKind, Target, aspect, in_viewport, in_x, in_y, media_matches, rectangle,
    scroll_x, scroll_y, viewport,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Node {
    Banner,
    Footer,
    Caption,
    Gone,
}

struct LegacyHost {
    scroll: Vec2,
}

impl LayoutSurface for LegacyHost {
    type Node = Node;

    fn client_size(&self) -> Size {
        Size::new(1009.0, 700.0)
    }

    fn inner_size(&self) -> Size {
        Size::new(1024.0, 700.0)
    }

    fn page_offset(&self) -> Option<Vec2> {
        None
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }

    fn node_kind(&self, node: &Node) -> NodeKind {
        match node {
            Node::Caption => NodeKind::Text,
            _ => NodeKind::Element,
        }
    }

    fn bounding_client_rect(&self, node: &Node) -> Option<Rect> {
        let page = match node {
            Node::Banner => Rect::new(0.0, 0.0, 1009.0, 120.0),
            Node::Footer => Rect::new(0.0, 2_000.0, 1009.0, 2_100.0),
            Node::Caption => Rect::new(0.0, 130.0, 200.0, 150.0),
            Node::Gone => return None,
        };
        Some(page - self.scroll)
    }
}

#[test]
fn viewport_ignores_scrollbar_gutter() {
    let host = LegacyHost { scroll: Vec2::ZERO };
    let vp = viewport(&host);
    assert_eq!(vp.width, 1024.0);
    assert_eq!(vp.height, 700.0);
}

#[test]
fn scroll_reads_document_offset_without_page_offset() {
    let host = LegacyHost {
        scroll: Vec2::new(0.0, 1_500.0),
    };
    assert_eq!(scroll_x(&host), 0.0);
    assert_eq!(scroll_y(&host), 1_500.0);
}

#[test]
fn visibility_follows_scroll_position() {
    let mut host = LegacyHost { scroll: Vec2::ZERO };
    assert!(in_viewport(&host, &Target::Node(Node::Banner), 0.0));
    assert!(!in_viewport(&host, &Target::Node(Node::Footer), 0.0));

    host.scroll = Vec2::new(0.0, 1_500.0);
    assert!(!in_viewport(&host, &Target::Node(Node::Banner), 0.0));
    assert!(in_viewport(&host, &Target::Node(Node::Footer), 0.0));
    // Per-axis: the banner is still horizontally aligned with the viewport.
    assert!(in_x(&host, &Target::Node(Node::Banner), 0.0));
    assert!(!in_y(&host, &Target::Node(Node::Banner), 0.0));
}

#[test]
fn text_and_detached_nodes_have_no_geometry() {
    let host = LegacyHost { scroll: Vec2::ZERO };
    assert!(rectangle(&host, &Target::Node(Node::Caption), 0.0).is_none());
    assert!(rectangle(&host, &Target::Node(Node::Gone), 0.0).is_none());
    assert!(!in_viewport(&host, &Target::Node(Node::Caption), 1_000.0));
    assert!(!in_viewport(&host, &Target::Node(Node::Gone), 1_000.0));
    assert_eq!(aspect(&host, Some(&Target::Node(Node::Gone))), None);
}

#[test]
fn collection_targets_use_the_first_node() {
    let host = LegacyHost { scroll: Vec2::ZERO };
    let target = Target::collection([Node::Footer, Node::Banner]);
    assert!(!in_viewport(&host, &target, 0.0));
}

#[test]
fn missing_media_capability_is_false() {
    let host = LegacyHost { scroll: Vec2::ZERO };
    assert!(!media_matches(&host, "(orientation: landscape)"));
}
