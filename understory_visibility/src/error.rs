// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_viewport::NodeKind;

/// Why [`Watcher::watch`](crate::Watcher::watch) registered nothing.
///
/// These are diagnostics only: a rejected watch has no side effects, and a
/// watch that was accepted never reports errors afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WatchError {
    /// The options carried no target.
    #[error("no watch target was given")]
    MissingTarget,
    /// The target is a single node that is not an element.
    #[error("watch target is a {0:?} node, not an element")]
    NotAnElement(NodeKind),
}
