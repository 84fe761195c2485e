// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer queue primitives for UI runtimes.
//!
//! [`TimerQueue`] holds one-shot and fixed-rate interval timers in a single
//! deadline-ordered queue. It never reads a clock and never sleeps. Time is an
//! opaque, monotonically non-decreasing `u64` supplied by the host
//! (milliseconds, frames, or anything else), and the host drains expired
//! timers with [`TimerQueue::pop_due`] from whatever loop it already runs.
//!
//! ## Ordering
//!
//! - Timers expire in deadline order; equal deadlines expire in the order
//!   they were (re)armed.
//! - Interval timers are re-armed at their first period boundary after the
//!   time they were popped at, so a host that falls behind sees one expiry,
//!   not one per missed period. The cost of a pump never depends on the size
//!   of the gap.
//! - A period of zero is clamped to one unit so an interval can never starve
//!   the queue.
//! - Cancelled timers never expire.
//!
//! ## Example
//!
//! ```rust
//! use understory_timing::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let poll = timers.schedule_interval(0, 150, "poll");
//! timers.schedule_once(0, 200, "toast");
//!
//! let mut fired = Vec::new();
//! while let Some(expired) = timers.pop_due(310) {
//!     fired.push((expired.deadline, expired.payload));
//! }
//! // The poll due at 300 was missed while catching up to 310; it is skipped.
//! assert_eq!(fired, [(150, "poll"), (200, "toast")]);
//! assert_eq!(timers.next_deadline(), Some(450));
//!
//! timers.cancel(poll);
//! assert!(timers.is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::collections::BinaryHeap;
use core::cmp::Reverse;

use hashbrown::HashMap;

/// Identifier of a scheduled timer.
///
/// Ids are never reused by a given queue.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// How a timer re-arms after expiring.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Repeat {
    /// Expire once and be removed.
    Once,
    /// Expire every `period` units.
    Every(u64),
}

/// A timer that reached its deadline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expired<T> {
    /// The timer that expired.
    pub id: TimerId,
    /// The deadline it was scheduled for (not the time it was popped).
    pub deadline: u64,
    /// The payload given when scheduling.
    pub payload: T,
}

#[derive(Clone, Debug)]
struct Slot<T> {
    payload: T,
    repeat: Repeat,
    deadline: u64,
    seq: u64,
}

/// A deadline-ordered queue of one-shot and interval timers.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    // (deadline, seq, id); entries whose seq no longer matches their slot are stale.
    // The top of the heap is always live (or the heap is empty).
    heap: BinaryHeap<Reverse<(u64, u64, TimerId)>>,
    slots: HashMap<TimerId, Slot<T>>,
    next_id: u64,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            slots: HashMap::new(),
            next_id: 0,
            next_seq: 0,
        }
    }

    /// Schedules `payload` to expire once at `now + delay`.
    pub fn schedule_once(&mut self, now: u64, delay: u64, payload: T) -> TimerId {
        self.insert(now.saturating_add(delay), Repeat::Once, payload)
    }

    /// Schedules `payload` to expire every `period` units, first at
    /// `now + period`.
    pub fn schedule_interval(&mut self, now: u64, period: u64, payload: T) -> TimerId {
        let period = period.max(1);
        self.insert(now.saturating_add(period), Repeat::Every(period), payload)
    }

    /// Cancels a timer, returning its payload if it was still scheduled.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let slot = self.slots.remove(&id)?;
        // Stale entries are skipped lazily; compact once they are the majority.
        if self.heap.len() > 2 * self.slots.len() + 1 {
            let slots = &self.slots;
            self.heap.retain(|Reverse((_, seq, id))| {
                slots.get(id).is_some_and(|slot| slot.seq == *seq)
            });
        }
        self.prune_top();
        Some(slot.payload)
    }

    /// Returns `true` if `id` is still scheduled.
    #[must_use]
    pub fn contains(&self, id: TimerId) -> bool {
        self.slots.contains_key(&id)
    }

    /// The earliest pending deadline, if any timer is scheduled.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse((deadline, ..))| *deadline)
    }

    /// Number of scheduled timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no timers are scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Cancels every timer.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.slots.clear();
    }

    fn insert(&mut self, deadline: u64, repeat: Repeat, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();
        self.slots.insert(
            id,
            Slot {
                payload,
                repeat,
                deadline,
                seq,
            },
        );
        self.heap.push(Reverse((deadline, seq, id)));
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn is_live(&self, seq: u64, id: TimerId) -> bool {
        self.slots.get(&id).is_some_and(|slot| slot.seq == seq)
    }

    /// Drops stale entries until the top of the heap is live.
    fn prune_top(&mut self) {
        while let Some(&Reverse((_, seq, id))) = self.heap.peek() {
            if self.is_live(seq, id) {
                break;
            }
            self.heap.pop();
        }
    }
}

/// The first `deadline + k * period` (k >= 1) strictly after `now`, or
/// `None` if it does not fit in a `u64`.
fn next_after(deadline: u64, period: u64, now: u64) -> Option<u64> {
    let missed = now.saturating_sub(deadline) / period;
    period
        .checked_mul(missed.checked_add(1)?)
        .and_then(|step| deadline.checked_add(step))
}

impl<T: Clone> TimerQueue<T> {
    /// Pops the next timer whose deadline is `<= now`.
    ///
    /// An interval timer expires at most once per call sequence for a given
    /// `now`: periods that were missed entirely are skipped, and the timer is
    /// re-armed at its first period boundary after `now`. An interval whose
    /// next boundary would not fit in a `u64` expires one last time and is
    /// removed.
    pub fn pop_due(&mut self, now: u64) -> Option<Expired<T>> {
        self.prune_top();
        let Reverse((deadline, _, id)) = *self.heap.peek()?;
        if deadline > now {
            return None;
        }
        self.heap.pop();

        let repeat = self.slots.get(&id)?.repeat;
        let next = match repeat {
            Repeat::Once => None,
            Repeat::Every(period) => next_after(deadline, period, now),
        };
        let expired = match next {
            Some(next) => {
                let next_seq = self.bump_seq();
                let slot = self.slots.get_mut(&id)?;
                slot.deadline = next;
                slot.seq = next_seq;
                self.heap.push(Reverse((next, next_seq, id)));
                Expired {
                    id,
                    deadline,
                    payload: slot.payload.clone(),
                }
            }
            None => {
                let slot = self.slots.remove(&id)?;
                Expired {
                    id,
                    deadline,
                    payload: slot.payload,
                }
            }
        };
        self.prune_top();
        Some(expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn drain(timers: &mut TimerQueue<&'static str>, now: u64) -> Vec<(u64, &'static str)> {
        let mut out = Vec::new();
        while let Some(e) = timers.pop_due(now) {
            out.push((e.deadline, e.payload));
        }
        out
    }

    #[test]
    fn nothing_fires_before_deadline() {
        let mut timers = TimerQueue::new();
        timers.schedule_once(0, 100, "a");
        assert_eq!(timers.pop_due(99), None);
        assert_eq!(timers.next_deadline(), Some(100));
        assert_eq!(drain(&mut timers, 100), [(100, "a")]);
        assert!(timers.is_empty());
    }

    #[test]
    fn equal_deadlines_fire_in_schedule_order() {
        let mut timers = TimerQueue::new();
        timers.schedule_once(0, 50, "first");
        timers.schedule_once(10, 40, "second");
        timers.schedule_once(0, 50, "third");
        assert_eq!(
            drain(&mut timers, 50),
            [(50, "first"), (50, "second"), (50, "third")]
        );
    }

    #[test]
    fn interval_skips_missed_periods() {
        let mut timers = TimerQueue::new();
        timers.schedule_interval(0, 150, "tick");
        assert_eq!(drain(&mut timers, 460), [(150, "tick")]);
        assert_eq!(timers.next_deadline(), Some(600));
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn interval_on_a_boundary_rearms_one_period_later() {
        let mut timers = TimerQueue::new();
        timers.schedule_interval(0, 150, "tick");
        assert_eq!(drain(&mut timers, 300), [(150, "tick")]);
        assert_eq!(timers.next_deadline(), Some(450));
    }

    #[test]
    fn huge_gap_costs_one_expiry() {
        let mut timers = TimerQueue::new();
        timers.schedule_interval(0, 150, "tick");
        let epoch_ms = 1_760_000_000_000;
        assert_eq!(drain(&mut timers, epoch_ms), [(150, "tick")]);
        let next = timers.next_deadline().unwrap();
        assert!(next > epoch_ms && next <= epoch_ms + 150, "next = {next}");
        assert_eq!((next - 150) % 150, 0);
    }

    #[test]
    fn draining_at_the_end_of_time_terminates() {
        let mut timers = TimerQueue::new();
        let poll = timers.schedule_interval(0, 150, "tick");
        timers.schedule_interval(u64::MAX - 1, 10, "late");
        assert_eq!(
            drain(&mut timers, u64::MAX),
            [(150, "tick"), (u64::MAX, "late")]
        );
        assert!(!timers.contains(poll));
        assert!(timers.is_empty());
        assert_eq!(timers.pop_due(u64::MAX), None);
    }

    #[test]
    fn cancelled_entries_are_compacted() {
        let mut timers = TimerQueue::new();
        let keep = timers.schedule_interval(0, 150, "keep");
        for _ in 0..1_000 {
            let id = timers.schedule_interval(0, 150, "churn");
            timers.cancel(id);
        }
        assert!(timers.heap.len() <= 3, "heap has {} entries", timers.heap.len());
        assert_eq!(timers.len(), 1);
        assert!(timers.contains(keep));
        assert_eq!(timers.next_deadline(), Some(150));
    }

    #[test]
    fn next_deadline_ignores_cancelled_timers() {
        let mut timers = TimerQueue::new();
        let early = timers.schedule_once(0, 10, "early");
        timers.schedule_once(0, 50, "late");
        timers.cancel(early);
        assert_eq!(timers.next_deadline(), Some(50));
    }

    #[test]
    fn cancel_prevents_expiry() {
        let mut timers = TimerQueue::new();
        let a = timers.schedule_interval(0, 10, "a");
        let b = timers.schedule_interval(0, 10, "b");
        assert_eq!(drain(&mut timers, 10), [(10, "a"), (10, "b")]);

        assert_eq!(timers.cancel(a), Some("a"));
        assert_eq!(timers.cancel(a), None);
        assert!(!timers.contains(a));
        assert!(timers.contains(b));
        assert_eq!(drain(&mut timers, 20), [(20, "b")]);
        assert_eq!(drain(&mut timers, 30), [(30, "b")]);
    }

    #[test]
    fn zero_period_is_clamped() {
        let mut timers = TimerQueue::new();
        timers.schedule_interval(5, 0, "spin");
        assert_eq!(drain(&mut timers, 6), [(6, "spin")]);
        assert_eq!(drain(&mut timers, 7), [(7, "spin")]);
    }

    #[test]
    fn clear_drops_everything() {
        let mut timers = TimerQueue::new();
        timers.schedule_interval(0, 10, "a");
        timers.schedule_once(0, 5, "b");
        timers.clear();
        assert!(timers.is_empty());
        assert_eq!(timers.pop_due(u64::MAX), None);
    }
}
