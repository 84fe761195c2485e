// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge-triggered visibility state machine.
//!
//! ## Minimal example
//!
//! ```
//! use understory_visibility::{Transition, VisibilityState};
//!
//! let mut state = VisibilityState::new();
//! let seen: Vec<_> = [false, false, true, true, false]
//!     .into_iter()
//!     .filter_map(|inside| state.update(inside))
//!     .collect();
//! assert_eq!(seen, [Transition::Entered, Transition::Exited]);
//! ```

/// Whether a target is currently considered inside the viewport.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Not (yet) seen inside the viewport. The initial state.
    #[default]
    Outside,
    /// Inside the viewport as of the last check.
    Inside,
}

/// A change of [`Visibility`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// `Outside` → `Inside`.
    Entered,
    /// `Inside` → `Outside`.
    Exited,
}

/// Tracks [`Visibility`] and reports transitions.
///
/// The state always starts `Outside`, whatever the real visibility is, so a
/// target that is visible from the start produces exactly one
/// [`Transition::Entered`] on its first check.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibilityState {
    visibility: Visibility,
}

impl VisibilityState {
    /// Creates a state in [`Visibility::Outside`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            visibility: Visibility::Outside,
        }
    }

    /// The current visibility.
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns `true` when the state is [`Visibility::Inside`].
    #[must_use]
    pub fn is_inside(&self) -> bool {
        self.visibility == Visibility::Inside
    }

    /// Feeds the result of a visibility check.
    ///
    /// Returns a transition only when `inside` differs from the current
    /// state. Repeating the same result is a no-op.
    pub fn update(&mut self, inside: bool) -> Option<Transition> {
        match (self.visibility, inside) {
            (Visibility::Outside, true) => {
                self.visibility = Visibility::Inside;
                Some(Transition::Entered)
            }
            (Visibility::Inside, false) => {
                self.visibility = Visibility::Outside;
                Some(Transition::Exited)
            }
            _ => None,
        }
    }
}
